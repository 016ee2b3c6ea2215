//! Bookkeeping of generated servers.
//!
//! A small JSON file records every generation run so repeated invocations can
//! tell the user what already exists. Append-only from this crate's
//! perspective.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CodegenError;

/// One generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextEntry {
    pub site: String,
    pub package: String,
    pub path: PathBuf,
    pub actions: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// The on-disk context record.
pub struct ContextFile {
    path: PathBuf,
}

impl ContextFile {
    /// Context file inside `dir` (created on first append).
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(".sitewright").join("context.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All recorded runs; a missing file is an empty history.
    pub fn entries(&self) -> Result<Vec<ContextEntry>, CodegenError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Record one generation run.
    pub fn record(&self, site: &str, generated: &crate::GeneratedServer) -> Result<(), CodegenError> {
        self.append(ContextEntry {
            site: site.to_string(),
            package: generated.package_name.clone(),
            path: generated.root.clone(),
            actions: generated.action_names.clone(),
            generated_at: Utc::now(),
        })
    }

    /// Record one more run.
    pub fn append(&self, entry: ContextEntry) -> Result<(), CodegenError> {
        let mut entries = self.entries()?;
        entries.push(entry);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        debug!(path = %self.path.display(), runs = entries.len(), "context updated");
        Ok(())
    }
}
