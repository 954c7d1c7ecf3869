//! One player's run across any number of worlds.
//!
//! A `Session` is the total state machine on top of [`World`]: it parses input lines,
//! routes them to the world while it is active, handles help/restart/quit, and after a
//! win or loss only accepts "restart" (anything else ends the session).

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::command::{parse_command, Command};
use super::render;
use super::world::{apply_move, Status, World};

const UNKNOWN: &str = "Unknown command. Type 'h' for help.";
const PROMPT: &str = "> ";
const END_PROMPT: &str = "Type 'r' to play again or 'x' to quit: ";

#[derive(Debug)]
pub struct Session {
    world: World,
    width: usize,
    height: usize,
    seeder: StdRng,
    finished: bool,
}

impl Session {
    /// Start a session. With `seed` set, every world of the session (including restarts)
    /// is reproducible.
    pub fn new(width: usize, height: usize, seed: Option<u64>) -> Self {
        let mut seeder = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let world = World::new(width, height, seeder.gen());
        Session {
            world,
            width,
            height,
            seeder,
            finished: false,
        }
    }

    /// Resume with a prepared world; restarts create `width` x `height` worlds.
    pub fn with_world(world: World, seed: u64) -> Self {
        Session {
            width: world.grid.width(),
            height: world.grid.height(),
            world,
            seeder: StdRng::seed_from_u64(seed),
            finished: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn status(&self) -> Status {
        self.world.status()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feed one raw input line and return the next session state.
    pub fn handle(mut self, line: &str) -> Session {
        if self.finished {
            return self;
        }
        let cmd = parse_command(line);
        debug!("turn {} status {:?} cmd {:?}", self.world.turn, self.status(), cmd);

        if self.status() != Status::Active {
            return match cmd {
                Command::Restart => self.restart(),
                _ => self.finish(),
            };
        }

        match cmd {
            Command::Move(dir) => {
                self.world = apply_move(self.world, dir);
                match self.world.status() {
                    Status::Won => info!(
                        "game won: score {} in {} turns",
                        self.world.score, self.world.turn
                    ),
                    Status::Lost => info!(
                        "game lost: score {} after {} turns",
                        self.world.score, self.world.turn
                    ),
                    Status::Active => {}
                }
                self
            }
            Command::Help => {
                self.world.message = render::help_text();
                self
            }
            Command::Restart => self.restart(),
            Command::Quit => self.finish(),
            Command::Unknown => {
                self.world.message = UNKNOWN.to_string();
                self
            }
        }
    }

    fn restart(mut self) -> Session {
        let seed = self.seeder.gen();
        debug!("restarting with seed {}", seed);
        self.world = World::new(self.width, self.height, seed);
        self
    }

    fn finish(mut self) -> Session {
        self.finished = true;
        self
    }

    /// What the console shows before reading the next line.
    pub fn screen(&self) -> String {
        let mut out = render::render(&self.world);
        match self.status() {
            Status::Won => {
                out.push('\n');
                out.push_str(&render::win_text(&self.world));
            }
            Status::Lost => {
                out.push('\n');
                out.push_str(&render::death_text(&self.world));
            }
            Status::Active => {}
        }
        out
    }

    pub fn prompt(&self) -> &'static str {
        match self.status() {
            Status::Active => PROMPT,
            Status::Won | Status::Lost => END_PROMPT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::{Grid, Pos};

    fn session_from(layout: &str) -> Session {
        let (grid, player) = Grid::parse(layout).expect("layout");
        let world = World::from_grid(grid, player, 5).expect("world");
        Session::with_world(world, 77)
    }

    #[test]
    fn help_only_changes_message() {
        let s = session_from("#####\n#@T.#\n#####");
        let before = s.world().clone();
        let s = s.handle("h");
        assert!(s.world().message.starts_with("HELP:"));
        assert_eq!(s.world().grid, before.grid);
        assert_eq!(s.world().player, before.player);
        assert_eq!(s.world().turn, 0);
    }

    #[test]
    fn unknown_command_sets_notice() {
        let s = session_from("#####\n#@T.#\n#####").handle("?");
        assert_eq!(s.world().message, UNKNOWN);
        assert_eq!(s.world().turn, 0);
        assert!(!s.is_finished());
    }

    #[test]
    fn quit_finishes_and_ignores_further_input() {
        let s = session_from("#####\n#@T.#\n#####").handle("x");
        assert!(s.is_finished());
        let s = s.handle("d");
        assert_eq!(s.world().turn, 0);
    }

    #[test]
    fn restart_builds_configured_size_world() {
        let s = session_from("#####\n#@T.#\n#####").handle("d");
        assert_eq!(s.world().score, 10);
        let s = s.handle("R");
        assert_eq!((s.world().grid.width(), s.world().grid.height()), (5, 3));
        assert_eq!((s.world().score, s.world().turn), (0, 0));
        assert_eq!(s.world().player, Pos::new(2, 1));
    }

    #[test]
    fn won_world_offers_restart_or_quit() {
        let s = session_from("####\n#@E#\n####").handle("d");
        assert_eq!(s.status(), Status::Won);
        assert_eq!(s.prompt(), END_PROMPT);
        assert!(s.screen().contains("You won!"));
        // Movement after a win is not a move: it ends the session.
        let done = s.handle("a");
        assert!(done.is_finished());
        assert_eq!(done.world().turn, 1);

        let s = session_from("####\n#@E#\n####").handle("d").handle("r");
        assert_eq!(s.status(), Status::Active);
        assert_eq!(s.prompt(), PROMPT);
    }

    #[test]
    fn lost_world_shows_game_over() {
        let mut s = session_from("#####\n#@XT#\n#####");
        s.world.health = 1;
        let s = s.handle("d");
        assert_eq!(s.status(), Status::Lost);
        assert!(s.screen().contains("GAME OVER!"));
    }

    #[test]
    fn seeded_sessions_repeat() {
        let a = Session::new(15, 11, Some(9)).handle("r");
        let b = Session::new(15, 11, Some(9)).handle("r");
        assert_eq!(a.world().grid, b.world().grid);
    }
}
