//! Project domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Env, Label};

/// A project is the top-level unit of configuration management.
///
/// It owns its labels and references any number of shared environments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Project together with its environments and labels, as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub envs: Vec<Env>,
    pub labels: Vec<Label>,
}

/// Reference to an existing environment by id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Label entry in a project payload. Entries that already carry an id are
/// existing labels and are left alone on create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRef {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Request to create a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub envs: Vec<EnvRef>,
    #[serde(default)]
    pub labels: Vec<LabelRef>,
}

impl CreateProjectRequest {
    /// Names of the labels that should be created along with the project
    pub fn new_label_names(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .filter(|label| label.id.is_none())
            .map(|label| label.name.as_str())
    }
}

/// Request to update a project.
///
/// `envs` and `labels` are accepted so clients can send back what they
/// received from the detail endpoint, but only `name` is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub envs: Vec<EnvRef>,
    #[serde(default)]
    pub labels: Vec<LabelRef>,
}
