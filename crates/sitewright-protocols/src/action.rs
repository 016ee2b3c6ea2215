//! Discovered-action catalog types.
//!
//! These are the unit of validation for a discovery response: deserializing
//! [`ActionsResponse`] from the repaired agent output IS the schema check.
//! Unknown parameter types and missing required fields fail deserialization
//! and therefore fail discovery; catalogs are never partially accepted.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declared type of one action parameter. Closed set; anything else in a
/// discovery response is a schema violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Boolean,
}

/// One declared parameter of a discovered action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// One catalog entry: an automatable action discovered on the target site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredAction {
    /// Unique-by-convention identifier (snake_case expected, not enforced
    /// beyond the schema).
    pub name: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ActionParameter>>,

    /// Templated natural-language instructions; may embed `{parameterName}`
    /// placeholders substituted by a later stage.
    pub steps: Vec<String>,

    /// Field-name to free-text description of what to extract. Describes, not
    /// enforces, shape; turning this into concrete validators is the
    /// synthesizer's job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_schema: Option<BTreeMap<String, String>>,
}

impl DiscoveredAction {
    /// Names of all declared parameters.
    pub fn declared_parameter_names(&self) -> BTreeSet<&str> {
        self.parameters
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }
}

/// The validated discovery response: an ordered action catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ActionsResponse {
    pub actions: Vec<DiscoveredAction>,
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
