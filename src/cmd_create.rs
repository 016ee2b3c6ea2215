//! The `create` command: authenticate, discover, synthesize.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use url::Url;

use sitewright_auth::{AuthOptions, AuthOutcome, Authenticator, StdinPrompt};
use sitewright_browser::{RemoteBrowser, RemoteSession};
use sitewright_codegen::{ContextFile, Synthesizer};
use sitewright_config::SitewrightConfig;
use sitewright_discovery::DiscoveryEngine;
use sitewright_protocols::BrowserSession;
use sitewright_vault::CliVault;

pub(crate) async fn run(
    config: &SitewrightConfig,
    url: &str,
    output: Option<PathBuf>,
    no_vault: bool,
) -> anyhow::Result<()> {
    let target = normalize_target(url);
    let domain = Url::parse(&target)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .with_context(|| format!("could not determine a host from {url:?}"))?;

    let browser = RemoteBrowser::new(&config.browser.endpoint, &config.browser.api_key);
    let session = browser
        .create_session(&config.browser.model)
        .await
        .context("failed to open a browser session")?;

    // Run the workflow, then release the session regardless of the outcome.
    let result = run_workflow(&session, config, &target, &domain, output, no_vault).await;
    if let Err(e) = session.close().await {
        warn!(error = %e, "failed to close browser session");
    }
    result
}

async fn run_workflow(
    session: &RemoteSession,
    config: &SitewrightConfig,
    target: &str,
    domain: &str,
    output: Option<PathBuf>,
    no_vault: bool,
) -> anyhow::Result<()> {
    let use_vault = config.vault.enabled && !no_vault;
    let vault = CliVault::new(&config.vault.cli_path);
    let mut prompt = StdinPrompt;

    let options = AuthOptions {
        page_wait: Duration::from_secs(config.timeouts.page_wait_secs),
        network_idle: Duration::from_secs(config.timeouts.network_idle_secs),
        offer_credential_save: use_vault,
    };

    let mut authenticator = Authenticator::new(session, &mut prompt).with_options(options);
    if use_vault {
        authenticator = authenticator.with_vault(&vault);
    }

    let outcome = authenticator
        .run(target)
        .await
        .context("authentication failed")?;
    if outcome == AuthOutcome::Skipped {
        warn!("authentication was skipped; discovery will only see public pages");
    }

    let engine = DiscoveryEngine::new(config.discovery.agent_step_budget);
    let actions = engine.discover(session, domain).await?;
    if actions.is_empty() {
        warn!(domain, "discovery returned an empty catalog; generating anyway");
    }

    let out_dir = output.unwrap_or_else(|| config.output.dir.clone());
    let generated = Synthesizer::new(&out_dir).generate(domain, &actions)?;
    ContextFile::in_dir(&out_dir).record(domain, &generated)?;

    info!(
        package = %generated.package_name,
        path = %generated.root.display(),
        "done"
    );
    println!(
        "Generated {} with {} action(s) at {}",
        generated.package_name,
        generated.action_names.len(),
        generated.root.display()
    );
    println!("Run it with: cd {} && cargo run", generated.root.display());
    Ok(())
}

/// Accept bare domains as well as full URLs.
fn normalize_target(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
