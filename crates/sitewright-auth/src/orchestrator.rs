//! Authentication Orchestrator.
//!
//! Drives one (url, domain) target through the login state machine:
//!
//! ```text
//! Inspecting ──► AuthNotRequired            (terminal: Completed)
//!      │
//!      ▼
//! LoginDetected ──► ClickingLoginAffordance ──► ReInspecting
//!                                                   │
//!                    ┌──────────────────────────────┤
//!                    ▼                              ▼
//!              AutofillAttempt ──────────────► ManualWait
//!                    │                              │
//!                    ▼                              ├──► UserSkipped (terminal: Skipped)
//!              AuthNotRequired                      ▼
//!                                              ReVerifying ──► AuthNotRequired (Completed)
//!                                                   │
//!                                                   ▼
//!                                              StillRequired (terminal: error)
//! ```
//!
//! Failed clicks and failed autofill degrade to the next strategy; only a
//! missing page, a missing live view, and a failed final verification are
//! fatal.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use sitewright_protocols::{
    BrowserSession, CredentialVault, Credentials, Page, WaitUntil,
};

use crate::error::AuthError;
use crate::inspector::{analyze_authentication_state, Inspection, InspectionSource};
use crate::prompt::{is_skip_token, UserPrompt};

/// Tunables for one authentication pass.
#[derive(Debug, Clone)]
pub struct AuthOptions {
    /// Bounded wait for an active page.
    pub page_wait: Duration,
    /// Bounded, non-fatal wait for network idleness after automated input.
    pub network_idle: Duration,
    /// Whether to offer saving credentials after a successful manual login.
    pub offer_credential_save: bool,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            page_wait: Duration::from_secs(10),
            network_idle: Duration::from_secs(5),
            offer_credential_save: true,
        }
    }
}

/// How the authentication phase ended.
///
/// `Skipped` means the user bypassed login: `requires_auth` was never driven
/// to false, and callers must not treat it as a confirmed login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Completed,
    Skipped,
}

/// One-shot login driver for a single target URL.
pub struct Authenticator<'a> {
    session: &'a dyn BrowserSession,
    vault: Option<&'a dyn CredentialVault>,
    prompt: &'a mut dyn UserPrompt,
    options: AuthOptions,
}

impl<'a> Authenticator<'a> {
    pub fn new(session: &'a dyn BrowserSession, prompt: &'a mut dyn UserPrompt) -> Self {
        Self {
            session,
            vault: None,
            prompt,
            options: AuthOptions::default(),
        }
    }

    pub fn with_vault(mut self, vault: &'a dyn CredentialVault) -> Self {
        self.vault = Some(vault);
        self
    }

    pub fn with_options(mut self, options: AuthOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the full state machine against `url`.
    pub async fn run(&mut self, url: &str) -> Result<AuthOutcome, AuthError> {
        let page_handle = self.session.active_page(self.options.page_wait).await?;
        let page = page_handle.as_ref();
        let domain = target_domain(url);

        info!(url, "navigating to target");
        page.navigate(url, WaitUntil::DomContentLoaded).await?;

        let mut inspection = analyze_authentication_state(page).await;
        narrate(&inspection);
        if !inspection.requires_auth() {
            info!("no authentication required");
            return Ok(AuthOutcome::Completed);
        }

        if let Some(control) = inspection.analysis.login_button.clone() {
            self.click_login_control(page, &control).await;
            self.settle(page).await;
            inspection = analyze_authentication_state(page).await;
            narrate(&inspection);
            if !inspection.requires_auth() {
                info!("login wall cleared after opening the login flow");
                return Ok(AuthOutcome::Completed);
            }
        }

        if inspection.analysis.can_autofill == Some(true) {
            if let Some(credentials) = self.lookup_credentials(&domain).await {
                match self.attempt_autofill(page, &credentials).await {
                    Ok(()) => {
                        self.settle(page).await;
                        inspection = analyze_authentication_state(page).await;
                        narrate(&inspection);
                        if !inspection.requires_auth() {
                            info!("autofill login succeeded");
                            return Ok(AuthOutcome::Completed);
                        }
                        info!("autofill did not clear the login wall, falling back to manual login");
                    }
                    Err(e) => {
                        warn!(error = %e, "autofill attempt failed, falling back to manual login")
                    }
                }
            }
        }

        let live_view = self.session.live_view_url()?;
        let line = self
            .prompt
            .read_line(&format!(
                "Authentication required. Complete the login in the live browser view:\n  \
                 {live_view}\nPress Enter once you are signed in, or type \"skip\" to continue \
                 without logging in."
            ))
            .await?;

        if is_skip_token(&line) {
            info!("authentication skipped by user");
            page.navigate(url, WaitUntil::DomContentLoaded).await?;
            return Ok(AuthOutcome::Skipped);
        }

        let inspection = analyze_authentication_state(page).await;
        narrate(&inspection);
        if inspection.requires_auth() {
            return Err(AuthError::StillRequired);
        }
        info!("manual login verified");

        self.offer_save(&domain).await?;
        Ok(AuthOutcome::Completed)
    }

    /// One atomic click on the described login control, with an observe pass
    /// to resolve vague descriptions first. Failures degrade: the flow
    /// re-inspects either way.
    async fn click_login_control(&self, page: &dyn Page, control: &str) {
        let mut instruction = format!("Click {control}");
        match page.observe(&instruction).await {
            Ok(candidates) => {
                if let Some(candidate) = candidates.first() {
                    debug!(candidate = %candidate.description, "login control resolved by observe");
                    instruction = format!("Click {}", candidate.description);
                }
            }
            Err(e) => {
                debug!(error = %e, "observe failed before login click, acting on the description")
            }
        }

        info!(%instruction, "opening the login flow");
        if let Err(e) = page.act(&instruction).await {
            warn!(error = %e, "login click failed, continuing");
        }
    }

    async fn lookup_credentials(&self, domain: &str) -> Option<Credentials> {
        let vault = self.vault?;
        let credentials = vault.lookup(domain).await;
        if credentials.is_none() {
            debug!(domain, "no stored credentials for this domain");
        }
        credentials
    }

    /// Type username, type password, submit: three atomic acts. Credential
    /// values travel as act variables, never inside instruction text.
    async fn attempt_autofill(
        &self,
        page: &dyn Page,
        credentials: &Credentials,
    ) -> Result<(), sitewright_protocols::DriverError> {
        info!(username = %credentials.username, "attempting credential autofill");
        page.act_with_variables(
            "Type %username% into the username or email field",
            HashMap::from([("username".to_string(), credentials.username.clone())]),
        )
        .await?;
        page.act_with_variables(
            "Type %password% into the password field",
            HashMap::from([("password".to_string(), credentials.password.clone())]),
        )
        .await?;
        page.act("Click the sign in or submit button on the login form")
            .await?;
        Ok(())
    }

    /// Bounded network-idle wait; expiry is not an error.
    async fn settle(&self, page: &dyn Page) {
        if let Err(e) = page
            .wait_for_network_idle(self.options.network_idle)
            .await
        {
            debug!(error = %e, "network idle wait did not settle, continuing");
        }
    }

    /// Post-manual-login credential save, on explicit opt-in only. Save
    /// failures propagate; declining is free.
    async fn offer_save(&mut self, domain: &str) -> Result<(), AuthError> {
        if !self.options.offer_credential_save {
            return Ok(());
        }
        let Some(vault) = self.vault else {
            return Ok(());
        };
        if !self
            .prompt
            .confirm("Save these credentials to your vault for next time? [y/N]")
            .await?
        {
            return Ok(());
        }

        let username = self.prompt.read_line("Username:").await?.trim().to_string();
        let password = self.prompt.read_line("Password:").await?.trim().to_string();
        if username.is_empty() || password.is_empty() {
            warn!("empty username or password, not saving");
            return Ok(());
        }

        vault.save(domain, &Credentials { username, password }).await?;
        info!(domain, "credentials saved to vault");
        Ok(())
    }
}

/// Host portion of the target URL, for vault lookups.
fn target_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.trim().to_string())
}

/// Log what the inspector saw without dropping any of it.
fn narrate(inspection: &Inspection) {
    let analysis = &inspection.analysis;
    if let InspectionSource::Heuristic { reason } = &inspection.source {
        warn!(%reason, "auth verdict came from the URL heuristic");
    }
    if let Some(summary) = &analysis.summary {
        info!(%summary, "auth state");
    }
    if let Some(blockers) = analysis.blockers.as_deref().filter(|b| !b.is_empty()) {
        warn!(?blockers, "login blockers detected");
    }
    if let Some(mfa) = analysis.mfa.as_ref().filter(|m| m.required) {
        warn!(
            description = mfa.description.as_deref().unwrap_or("unspecified"),
            "multi-factor authentication required"
        );
    }
    if let Some(steps) = analysis.steps.as_deref().filter(|s| !s.is_empty()) {
        debug!(?steps, "suggested login steps");
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
