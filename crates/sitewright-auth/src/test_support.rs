//! Hand-rolled fakes for the driver, vault, and prompt seams.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use sitewright_protocols::{
    AgentRun, BrowserSession, CredentialVault, Credentials, DriverError, ObservedAction, Page,
    VaultError, WaitUntil,
};

use crate::prompt::UserPrompt;

/// Scriptable page: queued extract/act results, recorded interactions.
pub struct FakePage {
    pub url: Mutex<String>,
    pub extract_results: Mutex<VecDeque<Result<serde_json::Value, DriverError>>>,
    pub act_results: Mutex<VecDeque<Result<(), DriverError>>>,
    pub observe_results: Mutex<VecDeque<Vec<ObservedAction>>>,
    pub extract_calls: AtomicUsize,
    pub acts: Mutex<Vec<String>>,
    pub navigations: Mutex<Vec<String>>,
}

impl FakePage {
    pub fn new(url: &str) -> Self {
        Self {
            url: Mutex::new(url.to_string()),
            extract_results: Mutex::new(VecDeque::new()),
            act_results: Mutex::new(VecDeque::new()),
            observe_results: Mutex::new(VecDeque::new()),
            extract_calls: AtomicUsize::new(0),
            acts: Mutex::new(Vec::new()),
            navigations: Mutex::new(Vec::new()),
        }
    }

    pub fn push_extract(&self, result: Result<serde_json::Value, DriverError>) {
        self.extract_results.lock().unwrap().push_back(result);
    }

    pub fn push_act(&self, result: Result<(), DriverError>) {
        self.act_results.lock().unwrap().push_back(result);
    }

    pub fn extract_count(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }

    pub fn acts(&self) -> Vec<String> {
        self.acts.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

#[async_trait]
impl Page for FakePage {
    async fn url(&self) -> Result<String, DriverError> {
        Ok(self.url.lock().unwrap().clone())
    }

    async fn navigate(&self, url: &str, _wait_until: WaitUntil) -> Result<(), DriverError> {
        self.navigations.lock().unwrap().push(url.to_string());
        *self.url.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn act(&self, instruction: &str) -> Result<(), DriverError> {
        self.acts.lock().unwrap().push(instruction.to_string());
        self.act_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn act_with_variables(
        &self,
        instruction: &str,
        _variables: HashMap<String, String>,
    ) -> Result<(), DriverError> {
        self.act(instruction).await
    }

    async fn observe(&self, _instruction: &str) -> Result<Vec<ObservedAction>, DriverError> {
        Ok(self
            .observe_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn extract(
        &self,
        _instruction: &str,
        _schema: serde_json::Value,
    ) -> Result<serde_json::Value, DriverError> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        self.extract_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(DriverError::ExtractionFailed(
                "no scripted extract result".to_string(),
            )))
    }

    async fn wait_for_network_idle(&self, _timeout: Duration) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Session fake handing out one shared [`FakePage`].
pub struct FakeSession {
    pub page: Arc<FakePage>,
    pub live_view: Option<String>,
    pub page_available: bool,
    pub agent_result: Mutex<Option<Result<AgentRun, DriverError>>>,
    pub agent_instructions: Mutex<Vec<String>>,
    pub agent_budgets: Mutex<Vec<u32>>,
}

impl FakeSession {
    pub fn new(page: Arc<FakePage>) -> Self {
        Self {
            page,
            live_view: Some("https://live.example/session/fake".to_string()),
            page_available: true,
            agent_result: Mutex::new(None),
            agent_instructions: Mutex::new(Vec::new()),
            agent_budgets: Mutex::new(Vec::new()),
        }
    }

    pub fn without_live_view(mut self) -> Self {
        self.live_view = None;
        self
    }

    pub fn without_page(mut self) -> Self {
        self.page_available = false;
        self
    }

    pub fn with_agent_result(self, result: Result<AgentRun, DriverError>) -> Self {
        *self.agent_result.lock().unwrap() = Some(result);
        self
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    fn id(&self) -> &str {
        "fake-session"
    }

    async fn active_page(&self, timeout: Duration) -> Result<Arc<dyn Page>, DriverError> {
        if self.page_available {
            Ok(Arc::clone(&self.page) as Arc<dyn Page>)
        } else {
            Err(DriverError::NoActivePage(timeout.as_secs()))
        }
    }

    fn live_view_url(&self) -> Result<String, DriverError> {
        self.live_view
            .clone()
            .ok_or_else(|| DriverError::NoLiveView("session has no identifier".to_string()))
    }

    async fn run_agent(
        &self,
        instructions: &str,
        max_steps: u32,
    ) -> Result<AgentRun, DriverError> {
        self.agent_instructions
            .lock()
            .unwrap()
            .push(instructions.to_string());
        self.agent_budgets.lock().unwrap().push(max_steps);
        self.agent_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(DriverError::AgentFailed(
                "no scripted agent result".to_string(),
            )))
    }

    async fn close(&self) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Prompt fake fed from a fixed list of input lines.
pub struct FakePrompt {
    lines: VecDeque<String>,
    pub shown: Vec<String>,
}

impl FakePrompt {
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            shown: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::with_lines(&[])
    }
}

#[async_trait]
impl UserPrompt for FakePrompt {
    async fn read_line(&mut self, message: &str) -> std::io::Result<String> {
        self.shown.push(message.to_string());
        self.lines.pop_front().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no scripted input")
        })
    }
}

/// Vault fake with fixed lookup credentials and recorded saves.
#[derive(Default)]
pub struct FakeVault {
    pub credentials: Option<Credentials>,
    pub saved: Mutex<Vec<(String, Credentials)>>,
    pub fail_save: bool,
}

impl FakeVault {
    pub fn with_credentials(username: &str, password: &str) -> Self {
        Self {
            credentials: Some(Credentials {
                username: username.to_string(),
                password: password.to_string(),
            }),
            ..Self::default()
        }
    }
}

#[async_trait]
impl CredentialVault for FakeVault {
    async fn lookup(&self, _domain: &str) -> Option<Credentials> {
        self.credentials.clone()
    }

    async fn save(&self, domain: &str, credentials: &Credentials) -> Result<(), VaultError> {
        if self.fail_save {
            return Err(VaultError::SaveFailed {
                domain: domain.to_string(),
                message: "scripted failure".to_string(),
            });
        }
        self.saved
            .lock()
            .unwrap()
            .push((domain.to_string(), credentials.clone()));
        Ok(())
    }
}

/// Analysis payload helpers for scripting extract results.
pub fn analysis(requires_auth: bool) -> serde_json::Value {
    serde_json::json!({ "requiresAuth": requires_auth })
}

pub fn analysis_with(requires_auth: bool, extra: &[(&str, serde_json::Value)]) -> serde_json::Value {
    let mut value = analysis(requires_auth);
    for (key, extra_value) in extra {
        value[*key] = extra_value.clone();
    }
    value
}
