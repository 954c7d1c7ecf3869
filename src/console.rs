//! Line-based console loop for the game.
//!
//! Works over any `BufRead`/`Write` pair so it can be driven by stdin/stdout or by a
//! scripted buffer. End of input counts as quitting.

use anyhow::{anyhow, Result};
use log::debug;
use std::io::{BufRead, Write};

use crate::game::Session;
use crate::logutil::escape_input;

pub const FAREWELL: &str = "Bye!";

/// Run the session until the player quits or input ends; returns the final state.
pub fn run<R: BufRead, W: Write>(mut session: Session, mut input: R, mut out: W) -> Result<Session> {
    let mut line = String::new();
    loop {
        write!(out, "\n{}\n{}", session.screen(), session.prompt())
            .map_err(|e| anyhow!("Failed to write frame: {}", e))?;
        out.flush()?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|e| anyhow!("Failed to read command: {}", e))?;
        if read == 0 {
            debug!("input closed");
            break;
        }
        debug!("input: {}", escape_input(&line));

        session = session.handle(&line);
        if session.is_finished() {
            break;
        }
    }
    writeln!(out, "\n{}", FAREWELL)?;
    out.flush()?;
    Ok(session)
}
