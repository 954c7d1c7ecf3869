//! # Delve - console dungeon explorer and quote fetcher
//!
//! Two small console utilities behind one binary:
//!
//! - **Dungeon Explorer**: a turn-based grid crawl driven by single-letter commands.
//!   Collect the treasures, dodge the traps, then find the exit that appears once the
//!   last treasure is gone.
//! - **Quote fetcher**: one HTTP GET to a random-quote API, printing the quote or a
//!   single classified error line.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use delve::config::Config;
//! use delve::game::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("delve.toml").await?;
//!     let session = Session::new(config.game.width, config.game.height, config.game.seed);
//!     let stdin = std::io::stdin();
//!     delve::console::run(session, stdin.lock(), std::io::stdout())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - world simulator, commands, session state machine and rendering
//! - [`console`] - line-based I/O loop for a game session
//! - [`quote`] - the quote fetcher (feature `quote`, on by default)
//! - [`config`] - TOML configuration and validation
//! - [`logutil`] - single-line escaping for logged input and payloads

pub mod config;
pub mod console;
pub mod game;
pub mod logutil;
#[cfg(feature = "quote")]
pub mod quote;
