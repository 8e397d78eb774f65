//! Router construction for the catalog server.

use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};
use catalog_core::CatalogService;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Build the full axum router with all routes and middleware.
pub fn build_router(service: Arc<CatalogService>) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health::health))
        // Taxonomy
        .route(
            "/category/",
            get(handlers::category::list).post(handlers::category::create),
        )
        .route(
            "/category/:category_uuid/",
            get(handlers::category::retrieve)
                .put(handlers::category::update)
                .delete(handlers::category::destroy),
        )
        .route(
            "/sub-category/",
            get(handlers::sub_category::list).post(handlers::sub_category::create),
        )
        .route(
            "/sub-category/:sub_category_uuid/",
            get(handlers::sub_category::retrieve)
                .put(handlers::sub_category::update)
                .delete(handlers::sub_category::destroy),
        )
        .route(
            "/sub-of-sub/",
            get(handlers::sub_of_sub::list).post(handlers::sub_of_sub::create),
        )
        .route(
            "/sub-of-sub/:subs_uuid/",
            get(handlers::sub_of_sub::retrieve)
                .put(handlers::sub_of_sub::update)
                .delete(handlers::sub_of_sub::destroy),
        )
        // Units
        .route(
            "/unit/",
            get(handlers::unit::list).post(handlers::unit::create),
        )
        .route(
            "/unit/:unit_uuid/",
            get(handlers::unit::retrieve)
                .put(handlers::unit::update)
                .delete(handlers::unit::destroy),
        )
        // Products
        .route(
            "/product/",
            get(handlers::product::list).post(handlers::product::create),
        )
        .route(
            "/product/by-ancestor/:identifier/:uuid/",
            get(handlers::product::by_ancestor),
        )
        .route(
            "/product/:product_uuid/",
            get(handlers::product::retrieve)
                .put(handlers::product::update)
                .delete(handlers::product::destroy),
        )
        // Banners
        .route(
            "/banner/",
            get(handlers::banner::list).post(handlers::banner::create),
        )
        .route(
            "/banner/:banner_uuid/",
            get(handlers::banner::retrieve)
                .put(handlers::banner::update)
                .delete(handlers::banner::destroy),
        )
        .route("/search/", get(handlers::search::search));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().nest("/api", api).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(Extension(service)),
    )
}
