//! Remote session and page handles.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use sitewright_protocols::{
    AgentRun, BrowserSession, DriverError, ObservedAction, Page, WaitUntil,
};

use crate::api::{
    ActRequest, ActResponse, AgentRequest, AgentResponse, CreateSessionRequest,
    CreateSessionResponse, ExtractRequest, ExtractResponse, NavigateRequest, ObserveRequest,
    ObserveResponse, PageInfo, WaitRequest,
};
use crate::client::ApiClient;

/// Interval between polls while waiting for an active page.
const PAGE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Entry point to the automation service.
pub struct RemoteBrowser {
    client: Arc<ApiClient>,
}

impl RemoteBrowser {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Arc::new(ApiClient::new(endpoint, api_key)),
        }
    }

    /// Open a fresh browser session on the service.
    pub async fn create_session(&self, model: &str) -> Result<RemoteSession, DriverError> {
        let response: CreateSessionResponse = self
            .client
            .post(
                "/v1/sessions",
                &CreateSessionRequest {
                    model: model.to_string(),
                },
            )
            .await?;

        info!(session_id = %response.id, "browser session created");
        Ok(RemoteSession {
            live_view_url: response
                .live_view_url
                .unwrap_or_else(|| format!("{}/sessions/{}/live", self.client.base_url(), response.id)),
            id: response.id,
            client: Arc::clone(&self.client),
        })
    }
}

/// One live session on the service.
pub struct RemoteSession {
    id: String,
    live_view_url: String,
    client: Arc<ApiClient>,
}

#[async_trait]
impl BrowserSession for RemoteSession {
    fn id(&self) -> &str {
        &self.id
    }

    async fn active_page(&self, timeout: Duration) -> Result<Arc<dyn Page>, DriverError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match self
                .client
                .get::<PageInfo>(&format!("/v1/sessions/{}/page", self.id))
                .await
            {
                Ok(info) => {
                    let title = info.title.as_deref().unwrap_or("untitled");
                    debug!(url = %info.url, title, "active page available");
                    return Ok(Arc::new(RemotePage {
                        session_id: self.id.clone(),
                        client: Arc::clone(&self.client),
                    }));
                }
                Err(DriverError::Api { status: 404, .. }) => {
                    if tokio::time::Instant::now() >= deadline {
                        return Err(DriverError::NoActivePage(timeout.as_secs()));
                    }
                    tokio::time::sleep(PAGE_POLL_INTERVAL).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn live_view_url(&self) -> Result<String, DriverError> {
        if self.id.is_empty() {
            return Err(DriverError::NoLiveView(
                "session has no identifier".to_string(),
            ));
        }
        Ok(self.live_view_url.clone())
    }

    async fn run_agent(&self, instructions: &str, max_steps: u32) -> Result<AgentRun, DriverError> {
        info!(session_id = %self.id, max_steps, "starting autonomous agent run");
        let response: AgentResponse = self
            .client
            .post(
                &format!("/v1/sessions/{}/agent", self.id),
                &AgentRequest {
                    instructions,
                    max_steps,
                },
            )
            .await
            .map_err(|e| match e {
                DriverError::Api { status, message } => DriverError::AgentFailed(format!(
                    "service returned {}: {}",
                    status, message
                )),
                other => other,
            })?;
        info!(
            session_id = %self.id,
            completed_steps = response.completed_steps,
            success = response.success,
            "agent run finished"
        );
        Ok(response)
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.client
            .delete(&format!("/v1/sessions/{}", self.id))
            .await?;
        debug!(session_id = %self.id, "session closed");
        Ok(())
    }
}

/// Handle to the session's active page.
pub struct RemotePage {
    session_id: String,
    client: Arc<ApiClient>,
}

impl RemotePage {
    fn path(&self, suffix: &str) -> String {
        format!("/v1/sessions/{}/page{}", self.session_id, suffix)
    }

    async fn do_act(
        &self,
        instruction: &str,
        variables: Option<HashMap<String, String>>,
    ) -> Result<(), DriverError> {
        let response: ActResponse = self
            .client
            .post(
                &self.path("/act"),
                &ActRequest {
                    instruction,
                    variables,
                },
            )
            .await?;
        if !response.success {
            return Err(DriverError::ActionFailed(
                response
                    .message
                    .unwrap_or_else(|| format!("could not perform: {}", instruction)),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Page for RemotePage {
    async fn url(&self) -> Result<String, DriverError> {
        let info: PageInfo = self.client.get(&self.path("")).await?;
        Ok(info.url)
    }

    async fn navigate(&self, url: &str, wait_until: WaitUntil) -> Result<(), DriverError> {
        debug!(url, "navigating");
        self.client
            .post_unit(&self.path("/navigate"), &NavigateRequest { url, wait_until })
            .await
            .map_err(|e| match e {
                DriverError::Api { status, message } => {
                    DriverError::NavigationFailed(format!("{} ({})", message, status))
                }
                other => other,
            })
    }

    async fn act(&self, instruction: &str) -> Result<(), DriverError> {
        debug!(instruction, "acting");
        self.do_act(instruction, None).await
    }

    async fn act_with_variables(
        &self,
        instruction: &str,
        variables: HashMap<String, String>,
    ) -> Result<(), DriverError> {
        // Only the templated instruction is logged; variable values never are.
        debug!(instruction, "acting with variables");
        self.do_act(instruction, Some(variables)).await
    }

    async fn observe(&self, instruction: &str) -> Result<Vec<ObservedAction>, DriverError> {
        let response: ObserveResponse = self
            .client
            .post(&self.path("/observe"), &ObserveRequest { instruction })
            .await?;
        Ok(response.actions)
    }

    async fn extract(
        &self,
        instruction: &str,
        schema: serde_json::Value,
    ) -> Result<serde_json::Value, DriverError> {
        let response: ExtractResponse = self
            .client
            .post(
                &self.path("/extract"),
                &ExtractRequest {
                    instruction,
                    schema,
                },
            )
            .await
            .map_err(|e| match e {
                DriverError::Api { status, message } => DriverError::ExtractionFailed(format!(
                    "service returned {}: {}",
                    status, message
                )),
                other => other,
            })?;
        Ok(response.data)
    }

    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), DriverError> {
        self.client
            .post_unit(
                &self.path("/wait"),
                &WaitRequest {
                    state: "networkidle",
                    timeout_ms: timeout.as_millis() as u64,
                },
            )
            .await
            .map_err(|e| match e {
                DriverError::Api { status: 408, .. } => {
                    DriverError::Timeout("network idle".to_string())
                }
                other => other,
            })
    }
}
