//! # Sitewright Discovery
//!
//! The Action Discovery Engine: send an autonomous browsing agent through the
//! target site and turn its free-text reply into a validated, typed action
//! catalog.
//!
//! The agent is a language model and does not reliably honor "JSON only", so
//! the load-bearing correctness boundary is on this side: a repair pipeline
//! tolerates fenced and prose-wrapped JSON, and anything that still fails to
//! parse or validate is a hard error - no silent defaulting, no partial
//! catalogs.

mod brief;
mod engine;
mod repair;

pub use brief::exploration_brief;
pub use engine::{parse_catalog, DiscoveryEngine, DiscoveryError};
pub use repair::{repair_to_json_text, RepairError};
