//! API route definitions

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::{env_routes, project_routes, property_routes};

/// Build the application router.
///
/// Management endpoints are mounted under the configured context path;
/// `/health` always stays at the root.
pub fn build_router(state: AppState) -> Router {
    let management = Router::new()
        .nest("/project", project_routes())
        .nest("/env", env_routes())
        .nest("/property", property_routes());

    let context_path = state.config.server.normalized_context_path();
    let management = if context_path.is_empty() {
        management
    } else {
        Router::new().nest(&context_path, management)
    };

    let mut app = Router::new()
        .route("/health", get(health_check))
        .merge(management)
        .layer(TraceLayer::new_for_http());

    if state.config.server.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app.with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
