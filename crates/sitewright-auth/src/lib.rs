//! # Sitewright Auth
//!
//! The authentication phase of a sitewright run: the Page State Inspector
//! (classify the current page's auth state, with a URL heuristic fallback
//! that never fails) and the Authentication Orchestrator (the
//! detect → act → re-verify → escalate-to-manual → confirm state machine).
//!
//! Everything here runs against the driver traits in `sitewright-protocols`,
//! so the whole flow is exercisable with fake sessions.

mod error;
pub mod inspector;
pub mod orchestrator;
pub mod prompt;

#[cfg(test)]
mod test_support;

pub use error::AuthError;
pub use inspector::{analyze_authentication_state, Inspection, InspectionSource, AUTH_URL_HINTS};
pub use orchestrator::{AuthOptions, AuthOutcome, Authenticator};
pub use prompt::{is_skip_token, StdinPrompt, UserPrompt};
