//! Browser-driver capability traits.
//!
//! The browser driver is an external collaborator: a remote service that owns
//! a real browser and exposes semantic operations over it (navigate, act,
//! observe, extract, autonomous agent runs). These traits are its boundary;
//! implementations live outside this crate so the orchestration logic can be
//! exercised against fakes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DriverError;

/// How long navigation should block before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitUntil {
    /// Full load event.
    #[serde(rename = "load")]
    Load,
    /// DOM parsed, subresources may still be loading.
    #[serde(rename = "domcontentloaded")]
    DomContentLoaded,
    /// No network activity for a short window.
    #[serde(rename = "networkidle")]
    NetworkIdle,
}

/// One executable candidate returned by an observe call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservedAction {
    /// Human-readable description of the candidate element/action.
    pub description: String,
    /// Backend-resolved selector, when the service provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Suggested interaction method (click, fill, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Result of one autonomous agent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRun {
    /// The agent's final free-text message, if it produced one.
    pub message: Option<String>,
    /// Whether the agent reported completing its instructions.
    pub success: bool,
    /// Number of browser interactions the agent performed.
    #[serde(default)]
    pub completed_steps: u32,
}

/// Semantic operations against the session's active page.
#[async_trait]
pub trait Page: Send + Sync {
    /// Current page URL.
    async fn url(&self) -> Result<String, DriverError>;

    /// Navigate to a URL and wait for the requested load state.
    async fn navigate(&self, url: &str, wait_until: WaitUntil) -> Result<(), DriverError>;

    /// Perform one atomic natural-language action (click/type/submit as a
    /// single semantic unit).
    async fn act(&self, instruction: &str) -> Result<(), DriverError>;

    /// Like [`act`](Page::act), but the instruction references `%name%`
    /// placeholders resolved from `variables` by the driver. Values travel
    /// out-of-band, so sensitive input (passwords) never appears in the
    /// instruction text that gets narrated and logged.
    async fn act_with_variables(
        &self,
        instruction: &str,
        variables: HashMap<String, String>,
    ) -> Result<(), DriverError>;

    /// Observe executable candidates for an instruction without acting.
    async fn observe(&self, instruction: &str) -> Result<Vec<ObservedAction>, DriverError>;

    /// Extract structured data matching `schema` from the current page.
    async fn extract(
        &self,
        instruction: &str,
        schema: serde_json::Value,
    ) -> Result<serde_json::Value, DriverError>;

    /// Wait until the page's network is idle, up to `timeout`.
    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), DriverError>;
}

/// One remote browser session.
///
/// Exclusively owned by the workflow for the duration of one invocation; the
/// discovery agent reuses the same session after authentication concludes.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Session identifier assigned by the service.
    fn id(&self) -> &str;

    /// The currently active page, waiting up to `timeout` for one to appear.
    async fn active_page(&self, timeout: Duration) -> Result<Arc<dyn Page>, DriverError>;

    /// Live/debug viewing URL for this session, for human-in-the-loop login.
    fn live_view_url(&self) -> Result<String, DriverError>;

    /// Run an autonomous multi-step agent with a bounded step budget.
    async fn run_agent(&self, instructions: &str, max_steps: u32) -> Result<AgentRun, DriverError>;

    /// Release the session.
    async fn close(&self) -> Result<(), DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_until_wire_values() {
        assert_eq!(
            serde_json::to_string(&WaitUntil::DomContentLoaded).unwrap(),
            "\"domcontentloaded\""
        );
        assert_eq!(
            serde_json::to_string(&WaitUntil::NetworkIdle).unwrap(),
            "\"networkidle\""
        );
    }

    #[test]
    fn test_agent_run_defaults_completed_steps() {
        let run: AgentRun =
            serde_json::from_str(r#"{"message": "done", "success": true}"#).unwrap();
        assert_eq!(run.completed_steps, 0);
        assert_eq!(run.message.as_deref(), Some("done"));
    }
}
