use super::*;
use crate::test_support::{analysis_with, FakePage};
use sitewright_protocols::DriverError;

fn failing_extract_page(url: &str) -> FakePage {
    let page = FakePage::new(url);
    page.push_extract(Err(DriverError::ExtractionFailed("timeout".to_string())));
    page
}

#[tokio::test]
async fn test_heuristic_flags_login_urls() {
    for url in [
        "https://example.com/login",
        "https://example.com/SignIn",
        "https://auth.example.com/",
        "https://example.com/sign-in?next=/home",
        "https://example.com/account",
    ] {
        let page = failing_extract_page(url);
        let inspection = analyze_authentication_state(&page).await;
        assert!(inspection.requires_auth(), "expected auth for {url}");
        assert!(inspection.is_heuristic());
        let summary = inspection.analysis.summary.expect("summary present");
        assert!(!summary.is_empty());
    }
}

#[tokio::test]
async fn test_heuristic_passes_plain_urls() {
    let page = failing_extract_page("https://example.com/pricing");
    let inspection = analyze_authentication_state(&page).await;
    assert!(!inspection.requires_auth());
    assert!(inspection.is_heuristic());
    let summary = inspection.analysis.summary.expect("summary present");
    assert!(summary.contains("no login markers"));
}

#[tokio::test]
async fn test_malformed_extraction_falls_back() {
    let page = FakePage::new("https://example.com/login");
    page.push_extract(Ok(serde_json::json!("not an object")));
    let inspection = analyze_authentication_state(&page).await;
    assert!(inspection.requires_auth());
    match inspection.source {
        InspectionSource::Heuristic { reason } => {
            assert!(reason.contains("malformed"));
        }
        InspectionSource::Extraction => panic!("expected heuristic source"),
    }
}

#[tokio::test]
async fn test_successful_extraction_passes_through() {
    let page = FakePage::new("https://example.com/login");
    page.push_extract(Ok(analysis_with(
        true,
        &[
            ("loginButton", serde_json::json!("the Sign in link")),
            ("canAutofill", serde_json::json!(true)),
            ("summary", serde_json::json!("Email/password form shown")),
        ],
    )));

    let inspection = analyze_authentication_state(&page).await;
    assert_eq!(inspection.source, InspectionSource::Extraction);
    assert!(inspection.requires_auth());
    assert_eq!(
        inspection.analysis.login_button.as_deref(),
        Some("the Sign in link")
    );
    assert_eq!(inspection.analysis.can_autofill, Some(true));
}

#[tokio::test]
async fn test_extraction_verdict_beats_url_hints() {
    // A login-looking URL with a successful "no auth needed" extraction:
    // the extraction wins, the heuristic never runs.
    let page = FakePage::new("https://example.com/login");
    page.push_extract(Ok(analysis_with(false, &[])));
    let inspection = analyze_authentication_state(&page).await;
    assert!(!inspection.requires_auth());
    assert_eq!(inspection.source, InspectionSource::Extraction);
}
