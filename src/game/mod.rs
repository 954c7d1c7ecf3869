//! # Dungeon Explorer
//!
//! A small turn-based grid crawl. Walk the dungeon, pick up treasures (`T`) for points,
//! avoid traps (`X`) that cost health, grab the heal (`+`), and once every treasure is
//! gone an exit (`E`) appears somewhere: step on it to win.
//!
//! ## Components
//!
//! - [`grid`] - cell storage and bounded-retry placement
//! - [`world`] - the world simulator (`World::new`, [`apply_move`])
//! - [`command`] - single-letter command parsing (AZERTY and QWERTY)
//! - [`session`] - restart/help/quit and the win/loss state machine
//! - [`render`] - text frames
//!
//! ## Usage
//!
//! ```rust
//! use delve::game::{Session, Status};
//!
//! let session = Session::new(15, 11, Some(42));
//! let session = session.handle("d").handle("s");
//! assert!(!session.is_finished());
//! assert!(matches!(session.status(), Status::Active | Status::Won | Status::Lost));
//! ```

pub mod command;
pub mod grid;
pub mod render;
pub mod session;
pub mod world;

pub use command::{parse_command, Command};
pub use grid::{Cell, Direction, Grid, Placement, Pos};
pub use session::Session;
pub use world::{apply_move, Status, World};
