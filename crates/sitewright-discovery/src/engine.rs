//! Discovery engine: agent invocation, catalog parsing, validation.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::info;

use sitewright_protocols::{ActionsResponse, BrowserSession, DiscoveredAction, DriverError};

use crate::brief::exploration_brief;
use crate::repair::{excerpt, repair_to_json_text, RepairError};

/// Identifier-shaped `{placeholder}` tokens in step text. Prose braces and
/// numeric literals don't count.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to discover actions: {0}")]
    Agent(#[from] DriverError),

    #[error("failed to discover actions: agent returned no message")]
    EmptyResponse,

    #[error(transparent)]
    Repair(#[from] RepairError),

    #[error("failed to parse actions JSON (starts with: {excerpt:?}): {source}")]
    Parse {
        source: serde_json::Error,
        excerpt: String,
    },

    #[error("discovery response failed schema validation: {source}")]
    Schema { source: serde_json::Error },

    #[error("action {action:?} references undeclared parameter {placeholder:?} in its steps")]
    UndeclaredPlaceholder { action: String, placeholder: String },
}

/// One discovery pass against a site, reusing the workflow's browser session.
pub struct DiscoveryEngine {
    step_budget: u32,
}

impl DiscoveryEngine {
    pub fn new(step_budget: u32) -> Self {
        Self { step_budget }
    }

    /// Explore `domain` and return the validated action catalog.
    pub async fn discover(
        &self,
        session: &dyn BrowserSession,
        domain: &str,
    ) -> Result<Vec<DiscoveredAction>, DiscoveryError> {
        info!(domain, step_budget = self.step_budget, "exploring site for automatable actions");
        let run = session
            .run_agent(&exploration_brief(domain), self.step_budget)
            .await?;

        let raw = run
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or(DiscoveryError::EmptyResponse)?;

        let actions = parse_catalog(raw)?;
        for action in &actions {
            info!(name = %action.name, description = %action.description, "discovered action");
        }
        info!(count = actions.len(), "action catalog validated");
        Ok(actions)
    }
}

/// Repair, parse, and validate one raw agent reply into a catalog.
///
/// Every failure propagates; this never coerces a partially valid response.
pub fn parse_catalog(raw: &str) -> Result<Vec<DiscoveredAction>, DiscoveryError> {
    let text = repair_to_json_text(raw)?;

    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|source| DiscoveryError::Parse {
            source,
            excerpt: excerpt(text),
        })?;

    let response: ActionsResponse =
        serde_json::from_value(value).map_err(|source| DiscoveryError::Schema { source })?;

    validate_placeholders(&response)?;
    Ok(response.actions)
}

/// Placeholders used in steps must be declared parameters.
fn validate_placeholders(response: &ActionsResponse) -> Result<(), DiscoveryError> {
    for action in &response.actions {
        let declared = action.declared_parameter_names();
        for step in &action.steps {
            for capture in PLACEHOLDER.captures_iter(step) {
                let name = &capture[1];
                if !declared.contains(name) {
                    return Err(DiscoveryError::UndeclaredPlaceholder {
                        action: action.name.clone(),
                        placeholder: name.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
