//! # Stockbook CLI Library
//!
//! Thin command line caller over the inventory engine.
//!
//! ## Module Organization
//! ```text
//! stockbook_cli/
//! ├── lib.rs            ◄─── You are here (startup & run)
//! ├── cli.rs            ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs        ◄─── State type exports
//! │   ├── config.rs     ◄─── Configuration state
//! │   └── session.rs    ◄─── Store + file + clear protocol
//! ├── commands/
//! │   ├── mod.rs        ◄─── Dispatch
//! │   ├── product.rs    ◄─── add/list/search/update/remove
//! │   └── inventory.rs  ◄─── report/sort/clear
//! └── error.rs          ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::ApiResult;
use state::{ConfigState, InventorySession};

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging                                                  │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: WARN, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Parse arguments (clap)                                              │
/// │                                                                         │
/// │  3. Load configuration (STOCKBOOK_* env, --file wins)                   │
/// │                                                                         │
/// │  4. Open the session (missing file = empty inventory)                   │
/// │                                                                         │
/// │  5. Run the command, print its output                                   │
/// │                                                                         │
/// │  6. Save if anything changed                                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match execute(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Config, session, command, save. Separate from [`run`] so it can be driven
/// without a process.
pub fn execute(cli: Cli) -> ApiResult<String> {
    let mut config = ConfigState::from_env()?;
    if let Some(path) = cli.file {
        config.inventory_file = path;
    }
    debug!(?config, "Configuration loaded");

    let mut session = InventorySession::open(config)?;
    let output = commands::dispatch(&mut session, cli.command)?;

    if session.save_if_dirty()? {
        info!(path = %session.config().inventory_file.display(), "Changes saved");
    }

    Ok(output)
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - ERROR: Unrecoverable file errors
/// - WARN: Rejected files, discarded changes (default)
/// - INFO: Product mutations, saves, loads
/// - DEBUG: Protocol transitions, sorting
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
