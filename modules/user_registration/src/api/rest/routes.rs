use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
    Extension, Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::OpenApi;

use crate::api::rest::{handlers, openapi::ApiDoc, request_id};
use crate::config::UserRegistrationConfig;
use crate::domain::service::Service;

/// Registration routes, without middleware.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route("/registration/create", post(handlers::create_user))
        .route("/registration/statuses", get(handlers::list_statuses))
        .route("/registration/statistics", get(handlers::get_statistics))
        .route("/registration/status/{id}", get(handlers::change_status))
        .route("/registration/{id}", get(handlers::get_user))
        .layer(Extension(service))
}

/// Full application router: health, registration routes, optional OpenAPI
/// document and the middleware stack.
pub fn build_router(service: Arc<Service>, cfg: &UserRegistrationConfig) -> Router {
    tracing::debug!("Building router");
    let mut router = Router::new().route("/health", get(handlers::health_check));
    router = register_routes(router, service);

    if cfg.enable_docs {
        router = router.route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }));
    }

    // Middleware order (outermost to innermost):
    // SetRequestId -> PropagateRequestId -> push_req_id_to_extensions -> Trace -> Timeout -> CORS -> BodyLimit
    // Each `.layer` wraps the previous ones, so they are applied innermost first.
    router = router.layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes));

    if cfg.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    // 0 disables the timeout
    if cfg.request_timeout_sec > 0 {
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(cfg.request_timeout_sec),
        ));
    }
    router = router.layer(request_id::create_trace_layer());
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));

    let x_request_id = request_id::header();
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
}
