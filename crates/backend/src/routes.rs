use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::{handlers, system};

/// All application routes.
/// Session endpoints are public; everything else needs an access token.
pub fn configure_routes() -> Router {
    let protected = Router::new()
        // ========================================
        // A001 Laboratories
        // ========================================
        .route(
            "/api/laboratorios/",
            get(handlers::a001_laboratory::list).post(handlers::a001_laboratory::create),
        )
        .route(
            "/api/laboratorios/simple_list/",
            get(handlers::a001_laboratory::simple_list),
        )
        .route(
            "/api/laboratorios/:id/",
            get(handlers::a001_laboratory::get_by_id)
                .put(handlers::a001_laboratory::update)
                .patch(handlers::a001_laboratory::partial_update)
                .delete(handlers::a001_laboratory::delete),
        )
        // ========================================
        // A002 Products
        // ========================================
        .route(
            "/api/productos/",
            get(handlers::a002_product::list).post(handlers::a002_product::create),
        )
        .route(
            "/api/productos/simple_list/",
            get(handlers::a002_product::simple_list),
        )
        .route(
            "/api/productos/:id/",
            get(handlers::a002_product::get_by_id)
                .put(handlers::a002_product::update)
                .patch(handlers::a002_product::partial_update)
                .delete(handlers::a002_product::delete),
        )
        // ========================================
        // A003 Batches
        // ========================================
        .route(
            "/api/lotes/",
            get(handlers::a003_batch::list).post(handlers::a003_batch::create),
        )
        .route(
            "/api/lotes/simple_list/",
            get(handlers::a003_batch::simple_list),
        )
        .route(
            "/api/lotes/:id/",
            get(handlers::a003_batch::get_by_id)
                .put(handlers::a003_batch::update)
                .patch(handlers::a003_batch::partial_update)
                .delete(handlers::a003_batch::delete),
        )
        // ========================================
        // A004 Sales
        // ========================================
        .route(
            "/api/ventas/",
            get(handlers::a004_sale::list).post(handlers::a004_sale::create),
        )
        .route("/api/ventas/:id/", get(handlers::a004_sale::get_by_id))
        // ========================================
        // U101 Global search
        // ========================================
        .route(
            "/api/global-search/",
            get(handlers::u101_global_search::global_search),
        )
        .merge(system::api::routes::configure_user_routes())
        .layer(middleware::from_fn(system::auth::middleware::require_auth));

    Router::new()
        .merge(system::api::routes::configure_system_routes())
        .merge(protected)
}
