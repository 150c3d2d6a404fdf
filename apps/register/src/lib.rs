//! # Till Register Library
//!
//! Core library for the Till POS register. The binary in `main.rs` only
//! parses flags and calls [`run`].
//!
//! ## Module Organization
//! ```text
//! till_register/
//! ├── lib.rs          ◄─── You are here (startup & tracing)
//! ├── console.rs      ◄─── Line parser + stdin/stdout loop
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── RegisterConfig (defaults, TOML, env)
//! │   ├── session.rs  ◄─── RegisterSession (owned cart + persistence)
//! │   └── snapshot.rs ◄─── Background snapshot writer
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Order request + reset
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── ApiError / ConfigError
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod state;

use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{RegisterConfig, RegisterSession};

/// Startup options supplied by the binary.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit `register.toml`; the platform config dir when `None`.
    pub config_path: Option<PathBuf>,

    /// Forces persistence off regardless of configuration.
    pub no_persist: bool,
}

/// Runs the register console on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Register Startup                                  │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,till=debug,sqlx=warn (override with RUST_LOG)       │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → register.toml → TILL_* environment                     │
/// │                                                                         │
/// │  3. Open Session ─────────────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations                          │
/// │     • Restore the saved cart, start the snapshot writer                 │
/// │                                                                         │
/// │  4. Console Loop ─────────────────────────────────────────────────────► │
/// │     • stdin commands → JSON lines on stdout                             │
/// │                                                                         │
/// │  5. Close ────────────────────────────────────────────────────────────► │
/// │     • Flush the last snapshot, close the pool                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(options: RunOptions) -> Result<(), ApiError> {
    init_tracing();

    info!("Starting Till POS register");

    let mut config = RegisterConfig::load(options.config_path)?;
    if options.no_persist {
        config.persist_cart = false;
    }
    info!(
        store = %config.store_name,
        tax_rate_bps = config.default_tax_rate_bps,
        persist = config.persist_cart,
        "Configuration loaded"
    );

    let mut session = RegisterSession::open(config).await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let result = console::run_console(&mut session, stdin, stdout).await;

    // Flush the snapshot even when the console failed
    session.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till=trace` - Show trace for till crates only
/// - Default: `info,till=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till=debug,sqlx=warn"));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
