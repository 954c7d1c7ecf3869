//! The world simulator: one dungeon, one player, one update function.
//!
//! [`World::new`] builds a fresh dungeon and [`apply_move`] advances it by one player
//! move. The world is passed by value and returned, so every transition is explicit.
//!
//! Randomness: each move draws from an RNG derived from the world's seed, its turn
//! counter and the player position, so a world replays identically from its seed.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use super::grid::{Cell, Direction, Grid, Placement, Pos};

pub const START_HEALTH: i32 = 5;
pub const TREASURE_POINTS: u32 = 10;
pub const TRAP_DAMAGE: i32 = 1;
pub const HEAL_AMOUNT: i32 = 2;
/// Smallest side length; anything below has no interior cell for the player.
pub const MIN_SIDE: usize = 3;
/// Smallest side that leaves free floor once the minimum content is scattered.
/// Below it the interior fills up and the player is usually boxed in.
pub const MIN_PLAYABLE_SIDE: usize = 7;

const SCATTER_TRIES: usize = 10_000;
const EXIT_ATTEMPTS: usize = 200;
const EVENT_ATTEMPTS: usize = 60;
const TREASURE_EVENT_CHANCE: f64 = 0.12;
const TRAP_EVENT_CHANCE: f64 = 0.20;

const WELCOME: &str = "Welcome! Move with zqsd (or wasd).";
const FLAVOR: [&str; 4] = [
    "You tread carefully...",
    "Nothing interesting here.",
    "The dungeon is silent.",
    "You hear a noise in the distance.",
];
const TREASURE_EVENT_NOTE: &str = " (A golden glint appears somewhere...)";
const TRAP_EVENT_NOTE: &str = " (A sense of danger lingers...)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Won,
    Lost,
}

#[derive(Debug, Clone)]
pub struct World {
    pub grid: Grid,
    pub player: Pos,
    pub score: u32,
    pub health: i32,
    pub turn: u32,
    pub exit_spawned: bool,
    pub won: bool,
    /// Narration for the last action; overwritten every action.
    pub message: String,
    pub seed: u64,
}

impl World {
    /// Create a fresh dungeon of `width` x `height` cells (each raised to [`MIN_SIDE`]).
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        let (w, h) = (width.max(MIN_SIDE), height.max(MIN_SIDE));
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Grid::walled(w, h);
        let player = Pos::new(w / 2, h / 2);

        let mut forbidden: HashSet<Pos> = grid.border().collect();
        forbidden.insert(player);

        let area = w * h;
        let batches = [
            (Cell::Wall, (area / 18).max(6)),
            (Cell::Treasure, (area / 30).max(4)),
            (Cell::Trap, (area / 35).max(4)),
            (Cell::Heal, 1),
        ];
        for (cell, count) in batches {
            let placed = grid.scatter(&mut rng, cell, count, &forbidden, SCATTER_TRIES);
            if placed < count {
                debug!("world {}x{}: placed only {}/{} {:?}", w, h, placed, count, cell);
            }
        }

        World {
            grid,
            player,
            score: 0,
            health: START_HEALTH,
            turn: 0,
            exit_spawned: false,
            won: false,
            message: WELCOME.to_string(),
            seed,
        }
    }

    /// Wrap a prepared grid. Returns `None` if `player` is off the grid or on a wall.
    pub fn from_grid(grid: Grid, player: Pos, seed: u64) -> Option<Self> {
        if !grid.in_bounds(player) || grid.get(player) == Cell::Wall {
            return None;
        }
        let exit_spawned = grid.count(Cell::Exit) > 0;
        Some(World {
            grid,
            player,
            score: 0,
            health: START_HEALTH,
            turn: 0,
            exit_spawned,
            won: false,
            message: WELCOME.to_string(),
            seed,
        })
    }

    pub fn status(&self) -> Status {
        if self.won {
            Status::Won
        } else if self.health <= 0 {
            Status::Lost
        } else {
            Status::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.status() == Status::Active
    }

    pub fn treasures_left(&self) -> usize {
        self.grid.count(Cell::Treasure)
    }

    fn turn_rng(&self) -> StdRng {
        StdRng::seed_from_u64(
            self.seed
                .wrapping_add(self.turn as u64)
                .wrapping_add((self.player.x as u64) << 8)
                .wrapping_add((self.player.y as u64) << 16),
        )
    }
}

/// Advance the world by one player move.
///
/// Finished worlds (won or out of health) are returned untouched apart from the message.
pub fn apply_move(mut world: World, dir: Direction) -> World {
    if !world.is_active() {
        world.message = "The adventure is over. Press r to play again or x to quit.".into();
        return world;
    }
    let mut rng = world.turn_rng();

    let target = world.grid.step(world.player, dir);
    let cell = world.grid.get(target);
    if cell == Cell::Wall {
        world.message = "Ouch, a wall!".into();
        return world;
    }

    world.player = target;
    world.turn += 1;

    match cell {
        Cell::Treasure => {
            world.score += TREASURE_POINTS;
            world.grid.set(target, Cell::Floor);
            world.message = format!("Treasure found! +{} points.", TREASURE_POINTS);
        }
        Cell::Trap => {
            world.health -= TRAP_DAMAGE;
            world.grid.set(target, Cell::Floor);
            world.message = format!("A trap! -{} HP.", TRAP_DAMAGE);
        }
        Cell::Heal => {
            world.health += HEAL_AMOUNT;
            world.grid.set(target, Cell::Floor);
            world.message = format!("Healing! +{} HP.", HEAL_AMOUNT);
        }
        Cell::Exit => {
            world.won = true;
            world.message = "You found the exit! VICTORY!".into();
            debug!("world {}: won on turn {}", world.seed, world.turn);
            return world;
        }
        Cell::Floor | Cell::Wall => {
            world.message = FLAVOR[rng.gen_range(0..FLAVOR.len())].to_string();
        }
    }

    // Exit check runs before the random event, so a freshly spawned treasure delays the exit.
    if !world.exit_spawned && world.treasures_left() == 0 {
        spawn_exit(&mut world, &mut rng);
    }
    maybe_spawn(&mut world, &mut rng);
    world
}

fn spawn_exit(world: &mut World, rng: &mut StdRng) -> Placement {
    let outcome = world
        .grid
        .place_on_floor(rng, Cell::Exit, world.player, EXIT_ATTEMPTS);
    match outcome {
        Placement::Placed(pos) => {
            world.exit_spawned = true;
            world.message = "All treasures collected! An exit 'E' has appeared!".into();
            debug!("exit spawned at {},{} on turn {}", pos.x, pos.y, world.turn);
        }
        Placement::Exhausted => {
            world.message = "The exit could not be placed (the map is too crowded).".into();
            debug!("exit placement exhausted on turn {}", world.turn);
        }
    }
    outcome
}

fn maybe_spawn(world: &mut World, rng: &mut StdRng) {
    if world.exit_spawned {
        return;
    }
    let roll: f64 = rng.gen();
    let (cell, flavor) = if roll < TREASURE_EVENT_CHANCE {
        (Cell::Treasure, TREASURE_EVENT_NOTE)
    } else if roll < TRAP_EVENT_CHANCE {
        (Cell::Trap, TRAP_EVENT_NOTE)
    } else {
        return;
    };
    if let Placement::Placed(pos) =
        world
            .grid
            .place_on_floor(rng, cell, world.player, EVENT_ATTEMPTS)
    {
        world.message.push_str(flavor);
        debug!("event spawned {:?} at {},{}", cell, pos.x, pos.y);
    }
}
