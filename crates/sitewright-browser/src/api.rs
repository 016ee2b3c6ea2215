//! Automation-service API types.

use serde::{Deserialize, Serialize};

use sitewright_protocols::{AgentRun, ObservedAction, WaitUntil};

/// Request to open a session.
#[derive(Debug, Serialize)]
pub struct CreateSessionRequest {
    pub model: String,
}

/// Response to opening a session.
#[derive(Debug, Deserialize)]
pub struct CreateSessionResponse {
    pub id: String,
    #[serde(default)]
    pub live_view_url: Option<String>,
}

/// Current page descriptor.
#[derive(Debug, Deserialize)]
pub struct PageInfo {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NavigateRequest<'a> {
    pub url: &'a str,
    pub wait_until: WaitUntil,
}

#[derive(Debug, Serialize)]
pub struct ActRequest<'a> {
    pub instruction: &'a str,
    /// `%name%` placeholder values resolved service-side, so secrets stay
    /// out of the instruction text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<std::collections::HashMap<String, String>>,
}

/// Act outcome. The service reports semantic failure (element not found,
/// action refused) with `success: false` rather than an HTTP error.
#[derive(Debug, Deserialize)]
pub struct ActResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ObserveRequest<'a> {
    pub instruction: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ObserveResponse {
    #[serde(default)]
    pub actions: Vec<ObservedAction>,
}

#[derive(Debug, Serialize)]
pub struct ExtractRequest<'a> {
    pub instruction: &'a str,
    pub schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct ExtractResponse {
    pub data: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct WaitRequest {
    pub state: &'static str,
    pub timeout_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct AgentRequest<'a> {
    pub instructions: &'a str,
    pub max_steps: u32,
}

/// Agent runs come back in the shared wire shape.
pub type AgentResponse = AgentRun;
