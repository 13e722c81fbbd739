//! namewheel: terminal name wheel.
//!
//! Spin a wheel to draw a random name from a class list, with no-repeat
//! mode, draw history, and saved class lists.

mod app;
mod clipboard;
mod config;
mod error;
mod frontend;
mod store;
mod wheel;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use app::App;
use frontend::{Frontend, TuiFrontend};
use store::Store;

#[derive(Parser)]
#[command(name = "namewheel")]
#[command(about = "Terminal name wheel: spin to draw a random name", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.namewheel)
    /// Can also be set via NAMEWHEEL_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a saved class list to stdout, one name per line
    Export {
        /// Name of the saved class
        #[arg(value_name = "CLASS")]
        class: String,
    },
}

fn main() -> Result<()> {
    // Log to a file (RUST_LOG controls the level); a TUI app can't log to
    // stdout.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("namewheel.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var("NAMEWHEEL_DIR", data_dir);
        tracing::info!("Using custom data directory: {:?}", data_dir);
    }
    let data_dir = config::data_dir()?;
    let store = Store::new(&data_dir);

    if let Some(Commands::Export { class }) = cli.command {
        let data = store.load().context("failed to load saved state")?;
        match data.named_lists.get(&class) {
            Some(list) => {
                for name in &list.entries {
                    let name = name.trim();
                    if !name.is_empty() {
                        println!("{}", name);
                    }
                }
                return Ok(());
            }
            None => {
                eprintln!("✗ No class named \"{}\"", class);
                std::process::exit(1);
            }
        }
    }

    let config = config::Config::load(&data_dir, cli.config.as_deref())?;
    let app = App::new(config, store);
    run_tui(app)
}

fn run_tui(mut app: App) -> Result<()> {
    let mut frontend = TuiFrontend::new()?;
    let result = run_loop(&mut frontend, &mut app);
    frontend.cleanup()?;
    result
}

fn run_loop(frontend: &mut TuiFrontend, app: &mut App) -> Result<()> {
    while app.running {
        for event in frontend.poll_events()? {
            app.handle_event(event);
        }
        app.update();
        frontend.render(app)?;
    }
    Ok(())
}
