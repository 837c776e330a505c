use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::system::auth;

/// Session routes; only `/api/me/` needs an access token
pub fn configure_system_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/token/", post(handlers::auth::login))
        .route("/api/token/refresh/", post(handlers::auth::refresh))
        .route("/api/logout/", post(handlers::auth::logout))
        .route(
            "/api/me/",
            get(handlers::auth::me)
                .post(handlers::auth::me)
                .layer(middleware::from_fn(auth::middleware::require_auth)),
        )
}

/// User management, mounted behind `require_auth`
pub fn configure_user_routes() -> Router {
    Router::new()
        .route(
            "/api/usuarios/",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route("/api/usuarios/:id/", get(handlers::users::get_by_id))
}
