//! Property API routes

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::get,
    Json, Router,
};
use sqlx::SqliteConnection;

use crate::db;
use crate::domain::{Env, Label, Project, Property, PropertyCoordinate, PropertyQuery, SavePropertiesRequest};

use super::{ApiResult, AppError, AppState, WebResp};

/// Create property routes
pub fn property_routes() -> Router<AppState> {
    Router::new().route("/", get(get_properties).put(save_properties))
}

/// Look up the three entities behind a property coordinate and check they
/// fit together: the label belongs to the project and the project is
/// deployed to the env.
async fn resolve_coordinate(
    conn: &mut SqliteConnection,
    project_id: i64,
    env_id: i64,
    label_id: i64,
) -> Result<(Project, Env, Label), AppError> {
    let project = db::get_project(conn, project_id)
        .await?
        .ok_or_else(|| AppError::not_exist("Project", project_id))?;
    let env = db::get_env(conn, env_id)
        .await?
        .ok_or_else(|| AppError::not_exist("Env", env_id))?;
    let label = db::get_label(conn, label_id)
        .await?
        .ok_or_else(|| AppError::not_exist("Label", label_id))?;

    if label.project_id != project.id {
        return Err(AppError::BadRequest(format!(
            "Label [{}] does not belong to project [{}]",
            label.name, project.name
        )));
    }

    if !db::is_env_attached(conn, project.id, env.id).await? {
        return Err(AppError::BadRequest(format!(
            "Env [{}] is not attached to project [{}]",
            env.name, project.name
        )));
    }

    Ok((project, env, label))
}

async fn get_properties(
    State(state): State<AppState>,
    query: Result<Query<PropertyQuery>, QueryRejection>,
) -> ApiResult<Vec<Property>> {
    let Query(query) = query?;
    let mut conn = state.pool.acquire().await?;

    let (project, env, label) =
        resolve_coordinate(&mut conn, query.project_id, query.env_id, query.label_id).await?;

    let properties = state
        .persistence
        .find_properties(&mut conn, PropertyCoordinate::new(&project, &env, &label))
        .await?;

    Ok(Json(WebResp::success(properties)))
}

async fn save_properties(
    State(state): State<AppState>,
    payload: Result<Json<SavePropertiesRequest>, JsonRejection>,
) -> ApiResult<String> {
    let Json(req) = payload?;
    let mut tx = state.pool.begin().await?;

    let (project, env, label) =
        resolve_coordinate(&mut tx, req.project_id, req.env_id, req.label_id).await?;
    let coordinate = PropertyCoordinate::new(&project, &env, &label);

    tracing::info!("update {} properties of {}", req.properties.len(), coordinate);

    state
        .persistence
        .save_properties(&mut tx, coordinate, &req.properties)
        .await?;

    tx.commit().await?;

    Ok(Json(WebResp::success(format!(
        "update properties of [{}] success",
        coordinate
    ))))
}
