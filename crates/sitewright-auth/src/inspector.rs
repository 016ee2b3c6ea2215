//! Page State Inspector.
//!
//! One structured-extraction request classifies the current page's
//! authentication state. The inspector is infallible from the caller's
//! perspective: any extraction failure degrades to a URL heuristic, and the
//! result says which path produced it.

use tracing::{debug, warn};

use sitewright_protocols::{AuthAnalysis, Page};

/// URL substrings that mark a page as login-related for the heuristic.
pub const AUTH_URL_HINTS: [&str; 5] = ["login", "signin", "auth", "sign-in", "account"];

/// Fixed rubric for the extraction call.
const RUBRIC: &str = "\
Analyze this page's authentication state and answer:
1. Does the page currently require the user to sign in before it is useful? (requiresAuth)
2. If login is needed, which visible control starts it? Describe it in plain words, \
e.g. \"the Sign in link in the top-right corner\". (loginButton)
3. Could a username and password be typed into fields on this page right now? (canAutofill)
4. What login strategy would you recommend: autofill, manual, passwordless, or unknown? \
(recommendedStrategy, steps)
5. Are there blockers such as MFA, CAPTCHA, or SSO redirects? (blockers, mfa)
Also provide a one-sentence summary of the page's authentication state.";

/// Which path produced an [`Inspection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectionSource {
    /// The structured extraction answered the rubric.
    Extraction,
    /// Extraction failed; the verdict came from the URL heuristic.
    Heuristic { reason: String },
}

/// Result of inspecting the current page.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub analysis: AuthAnalysis,
    pub source: InspectionSource,
}

impl Inspection {
    pub fn requires_auth(&self) -> bool {
        self.analysis.requires_auth
    }

    pub fn is_heuristic(&self) -> bool {
        matches!(self.source, InspectionSource::Heuristic { .. })
    }
}

/// Classify the current page's authentication state. Never fails: extraction
/// problems of any kind fall back to the URL heuristic.
pub async fn analyze_authentication_state(page: &dyn Page) -> Inspection {
    let schema = serde_json::to_value(schemars::schema_for!(AuthAnalysis))
        .unwrap_or_else(|_| serde_json::json!({"type": "object"}));

    match page.extract(RUBRIC, schema).await {
        Ok(value) => match serde_json::from_value::<AuthAnalysis>(value) {
            Ok(analysis) => {
                debug!(requires_auth = analysis.requires_auth, "auth state extracted");
                Inspection {
                    analysis,
                    source: InspectionSource::Extraction,
                }
            }
            Err(e) => {
                heuristic_inspection(page, format!("extraction returned a malformed analysis: {e}"))
                    .await
            }
        },
        Err(e) => heuristic_inspection(page, format!("extraction call failed: {e}")).await,
    }
}

async fn heuristic_inspection(page: &dyn Page, reason: String) -> Inspection {
    warn!(%reason, "falling back to URL heuristic for auth state");

    let url = page.url().await.unwrap_or_default();
    let lowered = url.to_lowercase();
    let matched_hint = AUTH_URL_HINTS.iter().find(|h| lowered.contains(**h)).copied();

    let summary = match matched_hint {
        Some(hint) => format!(
            "Heuristic auth check ({reason}): the URL \"{url}\" contains \"{hint}\", \
             so this page is treated as requiring sign-in."
        ),
        None => format!(
            "Heuristic auth check ({reason}): the URL \"{url}\" has no login markers, \
             so this page is treated as not requiring sign-in."
        ),
    };

    let mut analysis = AuthAnalysis::bare(matched_hint.is_some());
    analysis.summary = Some(summary);

    Inspection {
        analysis,
        source: InspectionSource::Heuristic { reason },
    }
}

#[cfg(test)]
#[path = "inspector_tests.rs"]
mod tests;
