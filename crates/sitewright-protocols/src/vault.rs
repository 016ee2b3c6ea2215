//! Credential-vault capability trait.

use async_trait::async_trait;

use crate::error::VaultError;

/// Username/password pair for one site.
///
/// Ephemeral: held in memory during a single authentication attempt unless
/// explicitly persisted through [`CredentialVault::save`]. The `Debug`
/// implementation redacts the password so credentials never reach logs in
/// full.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// External secrets-vault boundary.
#[async_trait]
pub trait CredentialVault: Send + Sync {
    /// Best-effort credential lookup for a domain. Backend errors are caught
    /// internally and mapped to `None`; this never propagates a failure.
    async fn lookup(&self, domain: &str) -> Option<Credentials>;

    /// Persist credentials for a domain. Used only after a successful manual
    /// login and on explicit user opt-in; errors propagate.
    async fn save(&self, domain: &str, credentials: &Credentials) -> Result<(), VaultError>;
}
