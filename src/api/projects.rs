//! Project API routes

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::db;
use crate::domain::{CreateProjectRequest, ProjectDetail, UpdateProjectRequest};

use super::{
    require_name, AddLabelQuery, ApiResult, AppError, AppState, DeleteLabelQuery, IdQuery,
    WebResp,
};

/// Create project routes
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_projects)
                .post(create_project)
                .put(update_project)
                .delete(delete_project),
        )
        .route("/detail", get(get_project_detail))
        .route("/label", post(add_project_label).delete(delete_project_label))
}

async fn list_projects(State(state): State<AppState>) -> ApiResult<Vec<ProjectDetail>> {
    let mut conn = state.pool.acquire().await?;
    let projects = db::list_project_details(&mut conn).await?;
    Ok(Json(WebResp::success(projects)))
}

async fn get_project_detail(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<ProjectDetail> {
    let Query(IdQuery { id }) = query?;
    let mut conn = state.pool.acquire().await?;

    let project = db::get_project_detail(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_exist("Project", id))?;

    Ok(Json(WebResp::success(project)))
}

async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WebResp<String>>), AppError> {
    let Json(req) = payload?;
    let name = require_name("Project", &req.name)?;
    tracing::info!(
        "create Project : {} (envs: {}, labels: {})",
        name,
        req.envs.len(),
        req.labels.len()
    );

    let mut tx = state.pool.begin().await?;
    let project = db::insert_project(&mut tx, &name).await?;

    for env_ref in &req.envs {
        let env = db::get_env(&mut tx, env_ref.id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("Env [{}] not exist", env_ref.id)))?;
        db::attach_env(&mut tx, project.id, env.id).await?;
    }

    for label_name in req.new_label_names() {
        let label_name = require_name("Label", label_name)?;
        db::insert_label(&mut tx, project.id, &label_name).await?;
    }

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(WebResp::success("create Project success".to_string())),
    ))
}

async fn delete_project(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<String> {
    let Query(IdQuery { id }) = query?;
    let mut tx = state.pool.begin().await?;

    let project = db::get_project(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_exist("Project", id))?;

    tracing::info!("delete Project : {}", project.name);

    // Stored values first, then the management entity
    state
        .persistence
        .delete_properties_by_project(&mut tx, &project)
        .await?;
    db::delete_project(&mut tx, project.id).await?;

    tx.commit().await?;

    Ok(Json(WebResp::success("delete Project success".to_string())))
}

async fn update_project(
    State(state): State<AppState>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> ApiResult<String> {
    let Json(req) = payload?;
    let name = require_name("Project", &req.name)?;
    let mut tx = state.pool.begin().await?;

    let existing = db::get_project(&mut tx, req.id)
        .await?
        .ok_or_else(|| AppError::not_exist("Project", req.id))?;

    tracing::info!("update Project : {} --> {}", existing.name, name);

    // TODO: sync envs and labels from the request; removed labels need their
    // stored properties deleted through the persistence service.
    db::rename_project(&mut tx, existing.id, &name)
        .await?
        .ok_or_else(|| AppError::not_exist("Project", req.id))?;

    tx.commit().await?;

    Ok(Json(WebResp::success("update Project success".to_string())))
}

async fn add_project_label(
    State(state): State<AppState>,
    query: Result<Query<AddLabelQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<WebResp<String>>), AppError> {
    let Query(AddLabelQuery {
        project_id,
        label_name,
    }) = query?;
    let label_name = require_name("Label", &label_name)?;
    let mut conn = state.pool.acquire().await?;

    let owner = db::get_project(&mut conn, project_id)
        .await?
        .ok_or_else(|| AppError::not_exist("Project", project_id))?;

    db::insert_label(&mut conn, owner.id, &label_name).await?;
    tracing::info!("create Label [{}-{}]", owner.name, label_name);

    Ok((
        StatusCode::CREATED,
        Json(WebResp::success(format!(
            "create project [{}] label [{}] success",
            owner.name, label_name
        ))),
    ))
}

async fn delete_project_label(
    State(state): State<AppState>,
    query: Result<Query<DeleteLabelQuery>, QueryRejection>,
) -> ApiResult<String> {
    let Query(DeleteLabelQuery { label_id }) = query?;
    let mut tx = state.pool.begin().await?;

    let label = db::get_label(&mut tx, label_id)
        .await?
        .ok_or_else(|| AppError::not_exist("Label", label_id))?;
    let project = db::get_project(&mut tx, label.project_id)
        .await?
        .ok_or_else(|| AppError::not_exist("Project", label.project_id))?;

    tracing::info!("delete Label [{}-{}]", project.name, label.name);

    state
        .persistence
        .delete_properties_by_label(&mut tx, &project, &label)
        .await?;
    db::delete_label(&mut tx, label.id).await?;

    tx.commit().await?;

    Ok(Json(WebResp::success(format!(
        "delete project [{}] label [{}] success",
        project.name, label.name
    ))))
}
