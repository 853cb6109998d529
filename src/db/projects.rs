//! Project database operations

use std::collections::HashMap;

use sqlx::SqliteConnection;

use super::{list_envs_for_project, list_labels_for_project, now_timestamp, parse_timestamp};
use super::{EnvRow, LabelRow};
use crate::domain::{Env, Label, Project, ProjectDetail};

/// Row type for projects table
#[derive(Debug, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectRow {
    pub fn to_project(&self) -> Project {
        Project {
            id: self.id,
            name: self.name.clone(),
            created_at: parse_timestamp(&self.created_at),
            updated_at: parse_timestamp(&self.updated_at),
        }
    }
}

/// Get a project by ID
pub async fn get_project(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Option<Project>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectRow>(
        "SELECT id, name, created_at, updated_at FROM projects WHERE id = ?",
    )
    .bind(project_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(|r| r.to_project()))
}

/// List all projects
pub async fn list_projects(conn: &mut SqliteConnection) -> Result<Vec<Project>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProjectRow>(
        "SELECT id, name, created_at, updated_at FROM projects ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(ProjectRow::to_project).collect())
}

/// Get a project with its environments and labels
pub async fn get_project_detail(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Option<ProjectDetail>, sqlx::Error> {
    let Some(project) = get_project(conn, project_id).await? else {
        return Ok(None);
    };

    let envs = list_envs_for_project(conn, project_id).await?;
    let labels = list_labels_for_project(conn, project_id).await?;

    Ok(Some(ProjectDetail {
        project,
        envs,
        labels,
    }))
}

/// List all projects with their environments and labels.
///
/// Loads the three tables once each and groups in memory.
pub async fn list_project_details(
    conn: &mut SqliteConnection,
) -> Result<Vec<ProjectDetail>, sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct ProjectEnvRow {
        project_id: i64,
        #[sqlx(flatten)]
        env: EnvRow,
    }

    let projects = list_projects(conn).await?;

    let env_rows = sqlx::query_as::<_, ProjectEnvRow>(
        r#"
        SELECT pe.project_id, e.id, e.name, e.created_at
        FROM project_envs pe
        JOIN envs e ON e.id = pe.env_id
        ORDER BY e.id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let label_rows = sqlx::query_as::<_, LabelRow>(
        "SELECT id, project_id, name, created_at FROM labels ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut envs: HashMap<i64, Vec<Env>> = HashMap::new();
    for row in &env_rows {
        envs.entry(row.project_id).or_default().push(row.env.to_env());
    }

    let mut labels: HashMap<i64, Vec<Label>> = HashMap::new();
    for row in &label_rows {
        labels.entry(row.project_id).or_default().push(row.to_label());
    }

    Ok(projects
        .into_iter()
        .map(|project| ProjectDetail {
            envs: envs.remove(&project.id).unwrap_or_default(),
            labels: labels.remove(&project.id).unwrap_or_default(),
            project,
        })
        .collect())
}

/// Create a new project
pub async fn insert_project(conn: &mut SqliteConnection, name: &str) -> Result<Project, sqlx::Error> {
    let now = now_timestamp();

    let result = sqlx::query("INSERT INTO projects (name, created_at, updated_at) VALUES (?, ?, ?)")
        .bind(name)
        .bind(&now)
        .bind(&now)
        .execute(&mut *conn)
        .await?;

    get_project(conn, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Reference an environment from a project. Attaching twice is a no-op.
pub async fn attach_env(
    conn: &mut SqliteConnection,
    project_id: i64,
    env_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO project_envs (project_id, env_id) VALUES (?, ?)")
        .bind(project_id)
        .bind(env_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Change a project's name
pub async fn rename_project(
    conn: &mut SqliteConnection,
    project_id: i64,
    name: &str,
) -> Result<Option<Project>, sqlx::Error> {
    let result = sqlx::query("UPDATE projects SET name = ?, updated_at = ? WHERE id = ?")
        .bind(name)
        .bind(now_timestamp())
        .bind(project_id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_project(conn, project_id).await
}

/// Delete a project; its labels and environment links go with it
pub async fn delete_project(conn: &mut SqliteConnection, project_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
