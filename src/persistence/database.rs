//! Property store backed by the `properties` table

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::SqliteConnection;

use super::PersistenceService;
use crate::domain::{Env, Label, Project, Property, PropertyCoordinate};

#[derive(Debug, Clone, Default)]
pub struct DbPersistenceService;

impl DbPersistenceService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PersistenceService for DbPersistenceService {
    async fn find_properties(
        &self,
        conn: &mut SqliteConnection,
        coordinate: PropertyCoordinate<'_>,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT key, value FROM properties
            WHERE project_id = ? AND env_id = ? AND label_id = ?
            ORDER BY key
            "#,
        )
        .bind(coordinate.project.id)
        .bind(coordinate.env.id)
        .bind(coordinate.label.id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(key, value)| Property { key, value })
            .collect())
    }

    async fn save_properties(
        &self,
        conn: &mut SqliteConnection,
        coordinate: PropertyCoordinate<'_>,
        properties: &BTreeMap<String, String>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM properties WHERE project_id = ? AND env_id = ? AND label_id = ?")
            .bind(coordinate.project.id)
            .bind(coordinate.env.id)
            .bind(coordinate.label.id)
            .execute(&mut *conn)
            .await?;

        for (key, value) in properties {
            sqlx::query(
                "INSERT INTO properties (project_id, env_id, label_id, key, value) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(coordinate.project.id)
            .bind(coordinate.env.id)
            .bind(coordinate.label.id)
            .bind(key)
            .bind(value)
            .execute(&mut *conn)
            .await?;
        }

        tracing::debug!("Stored {} properties for {}", properties.len(), coordinate);
        Ok(())
    }

    async fn delete_properties_by_project(
        &self,
        conn: &mut SqliteConnection,
        project: &Project,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE project_id = ?")
            .bind(project.id)
            .execute(&mut *conn)
            .await?;

        tracing::debug!(
            "Deleted {} properties of project {}",
            result.rows_affected(),
            project.name
        );
        Ok(result.rows_affected())
    }

    async fn delete_properties_by_label(
        &self,
        conn: &mut SqliteConnection,
        project: &Project,
        label: &Label,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE project_id = ? AND label_id = ?")
            .bind(project.id)
            .bind(label.id)
            .execute(&mut *conn)
            .await?;

        tracing::debug!(
            "Deleted {} properties of label {}-{}",
            result.rows_affected(),
            project.name,
            label.name
        );
        Ok(result.rows_affected())
    }

    async fn delete_properties_by_env(
        &self,
        conn: &mut SqliteConnection,
        env: &Env,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE env_id = ?")
            .bind(env.id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
