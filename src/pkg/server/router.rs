use axum::middleware::from_fn_with_state;
use axum::routing::{delete, post, put};
use axum::{Router, routing::get};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route("/jobs", get(handlers::jobs::list))
        .route("/jobs/search", get(handlers::jobs::search))
        .route("/jobs/create", post(handlers::jobs::create))
        .route("/jobs/{id}", get(handlers::jobs::get))
        .route("/jobs/{id}", put(handlers::jobs::update))
        .route("/jobs/{id}", delete(handlers::jobs::remove))
        .route("/jobs/{id}/apply", post(handlers::applications::apply))
        .route("/jobs/{id}/save", post(handlers::jobs::toggle_save))
        .route(
            "/jobs/application/status",
            put(handlers::applications::set_status),
        )
        .route("/jobs/user/applications", get(handlers::applications::mine))
        .route("/jobs/user/saved", get(handlers::jobs::saved))
        .route("/jobs/user/posted", get(handlers::jobs::posted))
        .layer(from_fn_with_state(state.clone(), authn::authenticate))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
