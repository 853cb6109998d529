//! API request/response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response envelope shared by every management endpoint
#[derive(Debug, Serialize)]
pub struct WebResp<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

impl<T> WebResp<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: None,
            message: None,
            data: Some(data),
            meta: ResponseMeta::now(),
        }
    }
}

impl WebResp<()> {
    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code.to_string()),
            message: Some(message.into()),
            data: None,
            meta: ResponseMeta::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }
}

/// `?id=` query parameter
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

/// Query parameters for adding a label to a project
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLabelQuery {
    pub project_id: i64,
    pub label_name: String,
}

/// Query parameters for deleting a label
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLabelQuery {
    pub label_id: i64,
}
