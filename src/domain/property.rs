//! Stored configuration values

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Env, Label, Project};

/// One stored configuration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: String,
}

/// Where a property set lives in the store.
///
/// Values are keyed by the ids of the project, env and label, so renaming
/// an entity keeps its values and same-named entities never share them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyCoordinate<'a> {
    pub project: &'a Project,
    pub env: &'a Env,
    pub label: &'a Label,
}

impl<'a> PropertyCoordinate<'a> {
    pub fn new(project: &'a Project, env: &'a Env, label: &'a Label) -> Self {
        Self {
            project,
            env,
            label,
        }
    }
}

/// Rendered as `application-profile-label`
impl std::fmt::Display for PropertyCoordinate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.project.name, self.env.name, self.label.name
        )
    }
}

/// Query parameters selecting a property set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuery {
    pub project_id: i64,
    pub env_id: i64,
    pub label_id: i64,
}

/// Request to replace a property set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePropertiesRequest {
    pub project_id: i64,
    pub env_id: i64,
    pub label_id: i64,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}
