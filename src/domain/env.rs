//! Environment domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A deployment target such as `dev`, `test` or `prod`.
///
/// Environments are shared: any number of projects may reference one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Env {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Request to create an environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnvRequest {
    pub name: String,
}
