//! Error taxonomy for the external capability boundaries.

use thiserror::Error;

/// Errors surfaced by the browser-driver capability.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("No active page became available within {0} seconds")]
    NoActivePage(u64),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Agent run failed: {0}")]
    AgentFailed(String),

    #[error("No live view available: {0}")]
    NoLiveView(String),

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,
}

/// Errors surfaced by the credential-vault capability.
///
/// Lookup paths never surface these to callers (a failed lookup is a
/// not-found); save paths propagate them.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Vault backend unavailable: {0}")]
    Unavailable(String),

    #[error("Vault command failed: {0}")]
    CommandFailed(String),

    #[error("Malformed vault output: {0}")]
    MalformedOutput(String),

    #[error("Failed to save credentials for {domain}: {message}")]
    SaveFailed { domain: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_api() {
        let err = DriverError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[test]
    fn test_driver_error_no_active_page() {
        let err = DriverError::NoActivePage(10);
        assert!(err.to_string().contains("10 seconds"));
    }

    #[test]
    fn test_vault_error_save_failed() {
        let err = VaultError::SaveFailed {
            domain: "linear.app".to_string(),
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("linear.app"));
        assert!(err.to_string().contains("permission denied"));
    }
}
