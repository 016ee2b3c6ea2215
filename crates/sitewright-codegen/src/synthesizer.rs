//! Template-driven emission of the generated server package.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use sitewright_protocols::{ActionsResponse, DiscoveredAction};

use crate::error::CodegenError;

const CARGO_TEMPLATE: &str = include_str!("../templates/server_cargo.toml.tmpl");
const MAIN_TEMPLATE: &str = include_str!("../templates/server_main.rs.tmpl");
const README_TEMPLATE: &str = include_str!("../templates/readme.md.tmpl");
const CONFIG_TEMPLATE: &str = include_str!("../templates/config.toml.tmpl");

/// What one generation run produced.
#[derive(Debug)]
pub struct GeneratedServer {
    pub package_name: String,
    pub root: PathBuf,
    pub action_names: Vec<String>,
}

/// Emits a tool-server package from a validated catalog.
pub struct Synthesizer {
    out_dir: PathBuf,
}

impl Synthesizer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Write the full package for `site`. The catalog is emitted verbatim as
    /// `actions.json`; templates only ever receive substitution values.
    pub fn generate(
        &self,
        site: &str,
        actions: &[DiscoveredAction],
    ) -> Result<GeneratedServer, CodegenError> {
        let package_name = package_name_for(site);
        let root = self.out_dir.join(&package_name);
        if root.exists() {
            return Err(CodegenError::OutputExists(root.display().to_string()));
        }
        fs::create_dir_all(root.join("src"))?;

        let catalog = ActionsResponse {
            actions: actions.to_vec(),
        };
        let actions_json = serde_json::to_string_pretty(&catalog)?;

        let site_url = if site.contains("://") {
            site.to_string()
        } else {
            format!("https://{site}")
        };

        write_file(
            &root.join("Cargo.toml"),
            &render(CARGO_TEMPLATE, &[("package_name", &package_name), ("site", site)]),
        )?;
        write_file(
            &root.join("src/main.rs"),
            &render(MAIN_TEMPLATE, &[("site", site)]),
        )?;
        write_file(&root.join("actions.json"), &actions_json)?;
        write_file(
            &root.join("README.md"),
            &render(
                README_TEMPLATE,
                &[
                    ("package_name", &package_name),
                    ("site", site),
                    ("site_url", &site_url),
                    ("action_list", &action_list(actions)),
                ],
            ),
        )?;
        write_file(
            &root.join("config.toml"),
            &render(CONFIG_TEMPLATE, &[("site", site)]),
        )?;

        info!(
            package = %package_name,
            path = %root.display(),
            actions = actions.len(),
            "server package generated"
        );

        Ok(GeneratedServer {
            package_name,
            root,
            action_names: actions.iter().map(|a| a.name.clone()).collect(),
        })
    }
}

/// Substitute `{{key}}` tokens. Plain replacement; template text containing
/// ordinary braces is left alone.
fn render(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut output = template.to_string();
    for (key, value) in substitutions {
        output = output.replace(&format!("{{{{{key}}}}}"), value);
    }
    output
}

/// Markdown bullet list of the catalog for the README.
fn action_list(actions: &[DiscoveredAction]) -> String {
    actions
        .iter()
        .map(|a| format!("- `{}` - {}", a.name, a.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Derive a package name from the site: lowercase, alphanumeric runs joined
/// by dashes.
fn package_name_for(site: &str) -> String {
    let host = site
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(site)
        .split(['/', ':', '?'])
        .next()
        .unwrap_or(site);

    let mut name = String::new();
    let mut last_dash = true;
    for c in host.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c);
            last_dash = false;
        } else if !last_dash {
            name.push('-');
            last_dash = true;
        }
    }
    let name = name.trim_end_matches('-');
    format!("{name}-tools")
}

fn write_file(path: &Path, content: &str) -> Result<(), CodegenError> {
    fs::write(path, content)?;
    debug!(path = %path.display(), "wrote");
    Ok(())
}

#[cfg(test)]
#[path = "synthesizer_tests.rs"]
mod tests;
