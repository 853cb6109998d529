//! Label database operations

use sqlx::SqliteConnection;

use super::{now_timestamp, parse_timestamp};
use crate::domain::Label;

/// Row type for labels table
#[derive(Debug, sqlx::FromRow)]
pub struct LabelRow {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub created_at: String,
}

impl LabelRow {
    pub fn to_label(&self) -> Label {
        Label {
            id: self.id,
            project_id: self.project_id,
            name: self.name.clone(),
            created_at: parse_timestamp(&self.created_at),
        }
    }
}

/// Get a label by ID
pub async fn get_label(
    conn: &mut SqliteConnection,
    label_id: i64,
) -> Result<Option<Label>, sqlx::Error> {
    let row = sqlx::query_as::<_, LabelRow>(
        "SELECT id, project_id, name, created_at FROM labels WHERE id = ?",
    )
    .bind(label_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(|r| r.to_label()))
}

/// List the labels of a project
pub async fn list_labels_for_project(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Vec<Label>, sqlx::Error> {
    let rows = sqlx::query_as::<_, LabelRow>(
        "SELECT id, project_id, name, created_at FROM labels WHERE project_id = ? ORDER BY id",
    )
    .bind(project_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(LabelRow::to_label).collect())
}

/// Create a label under a project
pub async fn insert_label(
    conn: &mut SqliteConnection,
    project_id: i64,
    name: &str,
) -> Result<Label, sqlx::Error> {
    let result = sqlx::query("INSERT INTO labels (project_id, name, created_at) VALUES (?, ?, ?)")
        .bind(project_id)
        .bind(name)
        .bind(now_timestamp())
        .execute(&mut *conn)
        .await?;

    get_label(conn, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Delete a label
pub async fn delete_label(conn: &mut SqliteConnection, label_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM labels WHERE id = ?")
        .bind(label_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
