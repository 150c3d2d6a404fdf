//! # Config Commands
//!
//! Read-only access to the loaded register configuration.

use tracing::debug;

use crate::state::{RegisterConfig, RegisterSession};

/// Gets the current register configuration.
///
/// ## When Used
/// - Console `config` command
/// - Currency formatting and receipt headers
pub fn get_config(session: &RegisterSession) -> RegisterConfig {
    debug!("get_config command");
    session.config().clone()
}
