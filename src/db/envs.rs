//! Environment database operations

use sqlx::SqliteConnection;

use super::{now_timestamp, parse_timestamp};
use crate::domain::Env;

/// Row type for envs table
#[derive(Debug, sqlx::FromRow)]
pub struct EnvRow {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

impl EnvRow {
    pub fn to_env(&self) -> Env {
        Env {
            id: self.id,
            name: self.name.clone(),
            created_at: parse_timestamp(&self.created_at),
        }
    }
}

/// Get an environment by ID
pub async fn get_env(conn: &mut SqliteConnection, env_id: i64) -> Result<Option<Env>, sqlx::Error> {
    let row = sqlx::query_as::<_, EnvRow>("SELECT id, name, created_at FROM envs WHERE id = ?")
        .bind(env_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.map(|r| r.to_env()))
}

/// List all environments
pub async fn list_envs(conn: &mut SqliteConnection) -> Result<Vec<Env>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EnvRow>("SELECT id, name, created_at FROM envs ORDER BY id")
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows.iter().map(EnvRow::to_env).collect())
}

/// List the environments a project is deployed to
pub async fn list_envs_for_project(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Vec<Env>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EnvRow>(
        r#"
        SELECT e.id, e.name, e.created_at
        FROM envs e
        JOIN project_envs pe ON pe.env_id = e.id
        WHERE pe.project_id = ?
        ORDER BY e.id
        "#,
    )
    .bind(project_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(EnvRow::to_env).collect())
}

/// Whether a project references an environment
pub async fn is_env_attached(
    conn: &mut SqliteConnection,
    project_id: i64,
    env_id: i64,
) -> Result<bool, sqlx::Error> {
    let count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM project_envs WHERE project_id = ? AND env_id = ?",
    )
    .bind(project_id)
    .bind(env_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count.0 > 0)
}

/// Create an environment. Fails with a unique violation if the name is taken.
pub async fn insert_env(conn: &mut SqliteConnection, name: &str) -> Result<Env, sqlx::Error> {
    let result = sqlx::query("INSERT INTO envs (name, created_at) VALUES (?, ?)")
        .bind(name)
        .bind(now_timestamp())
        .execute(&mut *conn)
        .await?;

    get_env(conn, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Delete an environment; project associations go with it
pub async fn delete_env(conn: &mut SqliteConnection, env_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM envs WHERE id = ?")
        .bind(env_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
