//! The `discover` command: explore without authenticating, print the catalog.

use std::time::Duration;

use anyhow::Context;
use tracing::warn;
use url::Url;

use sitewright_browser::RemoteBrowser;
use sitewright_config::SitewrightConfig;
use sitewright_discovery::DiscoveryEngine;
use sitewright_protocols::{BrowserSession, WaitUntil};

pub(crate) async fn run(config: &SitewrightConfig, url: &str) -> anyhow::Result<()> {
    let target = if url.contains("://") {
        url.trim().to_string()
    } else {
        format!("https://{}", url.trim())
    };
    let domain = Url::parse(&target)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .with_context(|| format!("could not determine a host from {url:?}"))?;

    let browser = RemoteBrowser::new(&config.browser.endpoint, &config.browser.api_key);
    let session = browser
        .create_session(&config.browser.model)
        .await
        .context("failed to open a browser session")?;

    let result = discover(&session, config, &target, &domain).await;
    if let Err(e) = session.close().await {
        warn!(error = %e, "failed to close browser session");
    }
    result
}

async fn discover(
    session: &dyn BrowserSession,
    config: &SitewrightConfig,
    target: &str,
    domain: &str,
) -> anyhow::Result<()> {
    let page = session
        .active_page(Duration::from_secs(config.timeouts.page_wait_secs))
        .await?;
    page.navigate(target, WaitUntil::DomContentLoaded).await?;

    let engine = DiscoveryEngine::new(config.discovery.agent_step_budget);
    let actions = engine.discover(session, domain).await?;

    println!("{}", serde_json::to_string_pretty(&actions)?);
    Ok(())
}
