//! # Sitewright Protocols
//!
//! Protocol definitions (traits) and shared data types for sitewright.
//! Contains only interface definitions and wire types - no implementations.
//!
//! ## Core Traits
//!
//! - [`BrowserSession`] - One remote browser session (agent runs, live view)
//! - [`Page`] - Semantic operations against the session's active page
//! - [`CredentialVault`] - Lookup/save of site credentials
//!
//! ## Data Model
//!
//! - [`AuthAnalysis`] - Classification of a page's authentication state
//! - [`DiscoveredAction`] / [`ActionsResponse`] - The action catalog produced
//!   by site exploration and consumed by the server synthesizer

pub mod action;
pub mod auth;
pub mod browser;
pub mod error;
pub mod vault;

pub use action::{ActionParameter, ActionsResponse, DiscoveredAction, ParameterType};
pub use auth::{AuthAnalysis, LoginStrategy, MfaInfo};
pub use browser::{AgentRun, BrowserSession, ObservedAction, Page, WaitUntil};
pub use error::{DriverError, VaultError};
pub use vault::{CredentialVault, Credentials};
