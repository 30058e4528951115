use crate::handlers::{
    bills::{create_bill, get_bills},
    health::health_check,
    pages::{index, route_not_found},
    payments::{create_payment, get_payments},
    users::{create_user, get_users},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir,
    set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.settings.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(route_not_found.into_service());

    // Unsupported methods on a known path answer like an unknown path
    Router::new()
        // Landing page and health check
        .route("/", get(index).fallback(route_not_found))
        .route("/api/health", get(health_check).fallback(route_not_found))
        // Users
        .route(
            "/api/users",
            get(get_users).post(create_user).fallback(route_not_found),
        )
        // Bills
        .route(
            "/api/bills",
            get(get_bills).post(create_bill).fallback(route_not_found),
        )
        // Payments
        .route(
            "/api/payments",
            get(get_payments).post(create_payment).fallback(route_not_found),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Static files, then the JSON 404
        .fallback_service(static_files)
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(state.settings.request_timeout()))
                .layer(CorsLayer::permissive())
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("SAMEORIGIN"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                )),
        )
        .with_state(state)
}
