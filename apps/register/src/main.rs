//! # Till Register Entry Point
//!
//! ```text
//! $ till-register --config ./register.toml
//! add P1 10 Masala Chai
//! {"cart":{"lines":[{"productId":"P1",...}],"totals":{"total":1180,...}}}
//! checkout
//! {"order":{"lines":[...],"total":1180,"paymentMethod":"CASH"}}
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use till_register::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "till-register", about = "Till POS register console", long_about = None)]
struct Cli {
    /// Path to register.toml
    #[arg(long, env = "TILL_CONFIG")]
    config: Option<PathBuf>,

    /// Keep the cart in memory only
    #[arg(long)]
    no_persist: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let options = RunOptions {
        config_path: cli.config,
        no_persist: cli.no_persist,
    };

    if let Err(error) = till_register::run(options).await {
        eprintln!("{error}");
        process::exit(1);
    }
}
