//! Authentication-state analysis types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Recommended way to get past a login wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoginStrategy {
    Autofill,
    Manual,
    Passwordless,
    Unknown,
}

/// Multi-factor authentication details, when detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MfaInfo {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Result of inspecting one page for authentication state.
///
/// Produced fresh on every inspection and discarded after each decision
/// point. `requires_auth == false` is the sole terminal success condition of
/// the authentication phase; every other field is advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthAnalysis {
    /// Whether the page currently demands sign-in.
    pub requires_auth: bool,

    /// Natural-language description of the control that starts login.
    /// Not a selector; resolved later by the driver's semantic locator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_button: Option<String>,

    /// Whether automatic credential entry should be attempted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_autofill: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_strategy: Option<LoginStrategy>,

    /// Suggested sub-steps for a human or agent to follow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,

    /// Detected obstacles (MFA, CAPTCHA, SSO).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockers: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa: Option<MfaInfo>,

    /// Human-readable explanation; used for narration and as the heuristic
    /// fallback payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuthAnalysis {
    /// An analysis carrying nothing but the auth verdict.
    pub fn bare(requires_auth: bool) -> Self {
        Self {
            requires_auth,
            login_button: None,
            can_autofill: None,
            recommended_strategy: None,
            steps: None,
            blockers: None,
            mfa: None,
            summary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_analysis_deserializes() {
        let analysis: AuthAnalysis =
            serde_json::from_str(r#"{"requiresAuth": true}"#).unwrap();
        assert!(analysis.requires_auth);
        assert!(analysis.login_button.is_none());
        assert!(analysis.summary.is_none());
    }

    #[test]
    fn test_full_analysis_deserializes() {
        let analysis: AuthAnalysis = serde_json::from_str(
            r#"{
                "requiresAuth": true,
                "loginButton": "the Sign in link in the top right",
                "canAutofill": true,
                "recommendedStrategy": "autofill",
                "steps": ["click sign in", "enter email"],
                "blockers": ["CAPTCHA"],
                "mfa": {"required": true, "description": "TOTP after password"},
                "summary": "Login wall with email/password form"
            }"#,
        )
        .unwrap();
        assert_eq!(
            analysis.recommended_strategy,
            Some(LoginStrategy::Autofill)
        );
        assert_eq!(analysis.mfa.as_ref().unwrap().required, true);
        assert_eq!(analysis.blockers.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_strategy_wire_values() {
        assert_eq!(
            serde_json::to_string(&LoginStrategy::Passwordless).unwrap(),
            "\"passwordless\""
        );
        let s: LoginStrategy = serde_json::from_str("\"manual\"").unwrap();
        assert_eq!(s, LoginStrategy::Manual);
    }
}
