//! Vault CLI backend.
//!
//! Shells out to an `op`-style secrets CLI: `item list` + `item get` for
//! lookups, `item create` for saves, JSON in and out. The subprocess boundary
//! stays inside this module; everything above it works with the
//! [`CredentialVault`] trait.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use sitewright_protocols::{CredentialVault, Credentials, VaultError};

use crate::matcher::record_matches;

/// Credential vault backed by an external CLI.
pub struct CliVault {
    cli_path: String,
}

/// Summary row from `item list`.
#[derive(Debug, Deserialize)]
struct ItemSummary {
    id: String,
    title: String,
    #[serde(default)]
    urls: Vec<ItemUrl>,
}

#[derive(Debug, Deserialize)]
struct ItemUrl {
    href: String,
}

/// Full item from `item get`.
#[derive(Debug, Deserialize)]
struct ItemDetail {
    #[serde(default)]
    fields: Vec<ItemField>,
}

#[derive(Debug, Deserialize)]
struct ItemField {
    #[serde(default)]
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

impl CliVault {
    pub fn new(cli_path: impl Into<String>) -> Self {
        Self {
            cli_path: cli_path.into(),
        }
    }

    /// Run the CLI and return stdout, mapping every failure mode to
    /// [`VaultError`].
    async fn run(&self, args: &[&str]) -> Result<String, VaultError> {
        let output = Command::new(&self.cli_path)
            .args(args)
            .output()
            .await
            .map_err(|e| VaultError::Unavailable(format!("{}: {}", self.cli_path, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VaultError::CommandFailed(format!(
                "{} {} exited with {}: {}",
                self.cli_path,
                args.first().unwrap_or(&""),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn find_matching_item(&self, domain: &str) -> Result<Option<ItemSummary>, VaultError> {
        let stdout = self
            .run(&["item", "list", "--categories", "Login", "--format", "json"])
            .await?;
        let items: Vec<ItemSummary> = serde_json::from_str(&stdout)
            .map_err(|e| VaultError::MalformedOutput(format!("item list: {}", e)))?;

        Ok(items.into_iter().find(|item| {
            let urls: Vec<String> = item.urls.iter().map(|u| u.href.clone()).collect();
            record_matches(&item.title, &urls, domain)
        }))
    }

    async fn fetch_credentials(&self, item_id: &str) -> Result<Option<Credentials>, VaultError> {
        let stdout = self
            .run(&["item", "get", item_id, "--format", "json"])
            .await?;
        let detail: ItemDetail = serde_json::from_str(&stdout)
            .map_err(|e| VaultError::MalformedOutput(format!("item get: {}", e)))?;
        Ok(credentials_from_detail(&detail))
    }
}

/// Pull username/password out of an item's field list.
fn credentials_from_detail(detail: &ItemDetail) -> Option<Credentials> {
    let field_value = |name: &str| {
        detail
            .fields
            .iter()
            .find(|f| {
                f.id.eq_ignore_ascii_case(name)
                    || f.label
                        .as_deref()
                        .is_some_and(|l| l.eq_ignore_ascii_case(name))
            })
            .and_then(|f| f.value.clone())
    };

    let username = field_value("username")?;
    let password = field_value("password")?;
    Some(Credentials { username, password })
}

#[async_trait]
impl CredentialVault for CliVault {
    async fn lookup(&self, domain: &str) -> Option<Credentials> {
        let item = match self.find_matching_item(domain).await {
            Ok(Some(item)) => item,
            Ok(None) => {
                debug!(domain, "no vault record matched");
                return None;
            }
            Err(e) => {
                warn!(domain, error = %e, "vault lookup failed, treating as not found");
                return None;
            }
        };

        debug!(domain, title = %item.title, "vault record matched");
        match self.fetch_credentials(&item.id).await {
            Ok(Some(credentials)) => Some(credentials),
            Ok(None) => {
                warn!(domain, title = %item.title, "matched record has no username/password fields");
                None
            }
            Err(e) => {
                warn!(domain, error = %e, "vault item fetch failed, treating as not found");
                None
            }
        }
    }

    async fn save(&self, domain: &str, credentials: &Credentials) -> Result<(), VaultError> {
        let url_arg = format!("--url=https://{}", domain);
        let username_arg = format!("username={}", credentials.username);
        let password_arg = format!("password={}", credentials.password);

        self.run(&[
            "item",
            "create",
            "--category",
            "Login",
            "--title",
            domain,
            &url_arg,
            &username_arg,
            &password_arg,
        ])
        .await
        .map_err(|e| VaultError::SaveFailed {
            domain: domain.to_string(),
            message: e.to_string(),
        })?;

        debug!(domain, "credentials saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(json: &str) -> ItemDetail {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_credentials_from_field_ids() {
        let detail = detail(
            r#"{"fields": [
                {"id": "username", "value": "ada@example.com"},
                {"id": "password", "value": "s3cret"}
            ]}"#,
        );
        let creds = credentials_from_detail(&detail).unwrap();
        assert_eq!(creds.username, "ada@example.com");
        assert_eq!(creds.password, "s3cret");
    }

    #[test]
    fn test_credentials_from_labels() {
        let detail = detail(
            r#"{"fields": [
                {"id": "f1", "label": "Username", "value": "ada"},
                {"id": "f2", "label": "PASSWORD", "value": "pw"}
            ]}"#,
        );
        let creds = credentials_from_detail(&detail).unwrap();
        assert_eq!(creds.username, "ada");
    }

    #[test]
    fn test_missing_password_field_yields_none() {
        let detail = detail(r#"{"fields": [{"id": "username", "value": "ada"}]}"#);
        assert!(credentials_from_detail(&detail).is_none());
    }

    #[test]
    fn test_item_list_parses() {
        let items: Vec<ItemSummary> = serde_json::from_str(
            r#"[{
                "id": "abc123",
                "title": "Linear",
                "urls": [{"href": "https://linear.app/login"}]
            }]"#,
        )
        .unwrap();
        assert_eq!(items[0].id, "abc123");
        assert_eq!(items[0].urls[0].href, "https://linear.app/login");
    }

    #[tokio::test]
    async fn test_lookup_maps_backend_failure_to_none() {
        let vault = CliVault::new("/nonexistent/sitewright-test-vault-cli");
        assert!(vault.lookup("linear.app").await.is_none());
    }

    #[tokio::test]
    async fn test_save_propagates_backend_failure() {
        let vault = CliVault::new("/nonexistent/sitewright-test-vault-cli");
        let creds = Credentials {
            username: "ada".to_string(),
            password: "pw".to_string(),
        };
        let err = vault.save("linear.app", &creds).await.unwrap_err();
        assert!(matches!(err, VaultError::SaveFailed { .. }));
    }
}
