//! Environment API routes

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::db;
use crate::domain::{CreateEnvRequest, Env};

use super::{is_unique_violation, require_name, ApiResult, AppError, AppState, IdQuery, WebResp};

/// Create environment routes
pub fn env_routes() -> Router<AppState> {
    Router::new().route("/", get(list_envs).post(create_env).delete(delete_env))
}

async fn list_envs(State(state): State<AppState>) -> ApiResult<Vec<Env>> {
    let mut conn = state.pool.acquire().await?;
    let envs = db::list_envs(&mut conn).await?;
    Ok(Json(WebResp::success(envs)))
}

async fn create_env(
    State(state): State<AppState>,
    payload: Result<Json<CreateEnvRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WebResp<Env>>), AppError> {
    let Json(req) = payload?;
    let name = require_name("Env", &req.name)?;
    let mut conn = state.pool.acquire().await?;

    let env = match db::insert_env(&mut conn, &name).await {
        Ok(env) => env,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::Conflict(format!("Env [{}] already exists", name)));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("create Env : {}", env.name);
    Ok((StatusCode::CREATED, Json(WebResp::success(env))))
}

async fn delete_env(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<String> {
    let Query(IdQuery { id }) = query?;
    let mut tx = state.pool.begin().await?;

    let env = db::get_env(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_exist("Env", id))?;

    tracing::info!("delete Env : {}", env.name);

    state.persistence.delete_properties_by_env(&mut tx, &env).await?;
    db::delete_env(&mut tx, env.id).await?;

    tx.commit().await?;

    Ok(Json(WebResp::success(format!("delete Env [{}] success", env.name))))
}
