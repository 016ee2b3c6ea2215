//! # Sitewright Vault
//!
//! Credential Store Adapter: looks up and saves site credentials against an
//! external vault CLI. Stored entries name sites inconsistently (product
//! title, bare domain, full login URL), so lookup goes through a fuzzy
//! domain-matching layer kept pure and separately testable in [`matcher`].
//!
//! Error policy follows the capability contract: lookup failures of any kind
//! degrade to not-found; save failures propagate.

pub mod cli;
pub mod matcher;

pub use cli::CliVault;
pub use matcher::{domain_candidates, record_matches, signature};
