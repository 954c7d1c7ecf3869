//! Binary entrypoint for the Delve CLI.
//!
//! Commands:
//! - `play [--width <n>] [--height <n>] [--seed <s>]` - play the dungeon (default command)
//! - `quote` - fetch and print one random quote
//! - `init` - write a starter `delve.toml`
//!
//! See the library crate docs for module-level details: `delve::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::info;

use delve::config::Config;
use delve::console;
use delve::game::Session;

#[derive(Parser)]
#[command(name = "delve")]
#[command(about = "A console dungeon explorer, plus a random quote fetcher")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "delve.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the dungeon explorer
    Play {
        /// Dungeon width in cells, 7 to 200 (overrides config)
        #[arg(long)]
        width: Option<usize>,
        /// Dungeon height in cells, 7 to 200 (overrides config)
        #[arg(long)]
        height: Option<usize>,
        /// Fixed seed for a reproducible dungeon (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Fetch one random quote and print it
    Quote,
    /// Write a default configuration file
    Init,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Play {
        width: None,
        height: None,
        seed: None,
    });

    match command {
        Commands::Init => {
            init_logging(&Config::default(), cli.verbose);
            if std::path::Path::new(&cli.config).exists() {
                println!("{} already exists; leaving it untouched.", cli.config);
                return Ok(());
            }
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
            println!("Wrote default configuration to {}", cli.config);
        }
        Commands::Play {
            width,
            height,
            seed,
        } => {
            let mut config = load_config(&cli.config, cli.verbose).await?;
            // CLI overrides config
            if let Some(w) = width {
                config.game.width = w;
            }
            if let Some(h) = height {
                config.game.height = h;
            }
            if seed.is_some() {
                config.game.seed = seed;
            }
            config.validate()?;
            play(&config).await?;
        }
        Commands::Quote => {
            let config = load_config(&cli.config, cli.verbose).await?;
            quote(&config).await?;
        }
    }

    Ok(())
}

/// Load the config (or defaults) and start logging from it.
async fn load_config(path: &str, verbosity: u8) -> Result<Config> {
    match Config::load_or_default(path).await {
        Ok(config) => {
            init_logging(&config, verbosity);
            Ok(config)
        }
        Err(e) => {
            init_logging(&Config::default(), verbosity);
            Err(e)
        }
    }
}

async fn play(config: &Config) -> Result<()> {
    let game = &config.game;
    info!(
        "Starting Delve v{} ({}x{}, seed {:?})",
        env!("CARGO_PKG_VERSION"),
        game.width,
        game.height,
        game.seed
    );
    let session = Session::new(game.width, game.height, game.seed);

    // Blocking stdin reader, raced against Ctrl-C below.
    let handle = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        console::run(session, stdin.lock(), std::io::stdout())
    });

    tokio::select! {
        res = handle => {
            let session = res.map_err(|e| anyhow!("Game loop failed: {}", e))??;
            let world = session.world();
            info!(
                "Session ended: status {:?}, score {}, turn {}",
                world.status(),
                world.score,
                world.turn
            );
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
            println!("\n{}", console::FAREWELL);
            // The blocking reader cannot be cancelled.
            std::process::exit(0);
        }
    }
    Ok(())
}

#[cfg(feature = "quote")]
async fn quote(config: &Config) -> Result<()> {
    use delve::quote::{format_quote, QuoteClient};

    let client = QuoteClient::new(config.quote.clone());
    if !client.is_configured() {
        println!("Quote fetching is disabled in the [quote] config section.");
        return Ok(());
    }
    match client.fetch().await {
        Ok(quote) => println!("{}", format_quote(&quote)),
        Err(e) => {
            log::debug!("Quote fetch failed: {:?}", e);
            println!("Error: {}", e);
        }
    }
    Ok(())
}

#[cfg(not(feature = "quote"))]
async fn quote(_config: &Config) -> Result<()> {
    eprintln!("Error: the quote command requires the 'quote' feature.");
    eprintln!("Compile with: cargo build --features quote");
    std::process::exit(1);
}

fn init_logging(config: &Config, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config.logging.level_filter(),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config.logging.file.as_ref().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Mirror to the console only with -v and a terminal on stderr.
        let echo = verbosity > 0 && atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if echo {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
