//! Label domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named configuration version belonging to exactly one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
