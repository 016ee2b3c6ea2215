//! Authentication-phase errors.
//!
//! Only genuinely fatal conditions live here. Failed clicks, failed autofill
//! and failed extraction calls degrade inside the orchestrator instead of
//! surfacing as errors.

use thiserror::Error;

use sitewright_protocols::{DriverError, VaultError};

#[derive(Debug, Error)]
pub enum AuthError {
    /// Final verification after login still reports a login wall.
    #[error("authentication still required after login attempt")]
    StillRequired,

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    /// Console interaction with the user failed.
    #[error("prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}
