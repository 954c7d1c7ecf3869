//! Text frames for the console.

use super::grid::Pos;
use super::world::{World, HEAL_AMOUNT, TRAP_DAMAGE, TREASURE_POINTS};

pub const PLAYER_GLYPH: char = '@';
const HEADER: &str = "=== Dungeon Explorer ===";
const LEGEND: &str = "Commands: zqsd / wasd to move, r to restart, h for help, x to quit";

pub fn status_line(world: &World) -> String {
    format!(
        "HP: {}   Score: {}   Turn: {}",
        world.health, world.score, world.turn
    )
}

/// Grid rows with the player overlaid, cells separated by a space.
pub fn grid_lines(world: &World) -> Vec<String> {
    world
        .grid
        .rows()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, cell)| {
                    if Pos::new(x, y) == world.player {
                        PLAYER_GLYPH
                    } else {
                        cell.glyph()
                    }
                })
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Full frame: header, status, legend, grid and the last message.
pub fn render(world: &World) -> String {
    let mut msg = String::new();
    msg.push_str(HEADER);
    msg.push_str("\n\n");
    msg.push_str(&status_line(world));
    msg.push('\n');
    msg.push_str(LEGEND);
    msg.push_str("\n\n");
    for line in grid_lines(world) {
        msg.push_str(&line);
        msg.push('\n');
    }
    msg.push('\n');
    msg.push_str(&world.message);
    msg.push('\n');
    msg
}

pub fn help_text() -> String {
    format!(
        "HELP:\n\
- '.' = floor\n\
- '#' = wall (blocks)\n\
- 'T' = treasure (+{} points)\n\
- 'X' = trap (-{} HP)\n\
- '+' = heal (+{} HP)\n\
- 'E' = exit (appears once every treasure is collected)\n\
Goal: collect every treasure, then find the exit.",
        TREASURE_POINTS, TRAP_DAMAGE, HEAL_AMOUNT
    )
}

pub fn win_text(world: &World) -> String {
    format!(
        "WELL DONE! You won!\nFinal score: {}  |  Turns: {}\n",
        world.score, world.turn
    )
}

pub fn death_text(world: &World) -> String {
    format!(
        "GAME OVER!\nFinal score: {}  |  Turns survived: {}\n",
        world.score, world.turn
    )
}
