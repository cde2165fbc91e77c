mod order;
mod order_detail;
mod payment;
mod product;
mod user;

use crate::state::AppState;
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use serde_json::json;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::order::order_routes;
pub use self::order_detail::order_detail_routes;
pub use self::payment::payment_routes;
pub use self::product::product_routes;
pub use self::user::user_routes;

const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        root_handler,
        health_handler,

        user::register_user,
        user::login_user,
        user::get_sellers,
        user::get_users,
        user::get_user,
        user::update_user,
        user::update_store_status,
        user::delete_user,
        user::upload_profile_image,

        product::get_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::delete_product,
        product::add_review,

        order::create_order,
        order::get_orders,
        order::get_order_stats,
        order::get_order,
        order::update_order_status,
        order::update_delivery_status,
        order::cancel_order,
        order::delete_order,

        order_detail::get_order_details,
        order_detail::get_order_detail,
        order_detail::get_details_by_order,
        order_detail::update_order_detail,
        order_detail::delete_order_detail,

        payment::create_transaction,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Root", description = "Liveness and readiness"),
        (name = "User", description = "Accounts, sellers and store approval"),
        (name = "Product", description = "Surplus food listings and reviews"),
        (name = "Order", description = "Checkout and order lifecycle"),
        (name = "Order-detail", description = "Order line snapshots"),
        (name = "Payment", description = "Snap checkout tokens"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Root",
    responses((status = 200, description = "Service is up", body = serde_json::Value))
)]
pub async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "Food surplus marketplace API is running",
    }))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Root",
    responses(
        (status = 200, description = "Database reachable", body = serde_json::Value),
        (status = 503, description = "Database unreachable", body = serde_json::Value)
    )
)]
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "success", "message": "healthy" })),
        ),
        Err(e) => {
            error!("❌ Health check failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "error", "message": "database unavailable" })),
            )
        }
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    if let Err(e) = encode(&mut buffer, &state.registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(user_routes(shared_state.clone()))
            .merge(product_routes(shared_state.clone()))
            .merge(order_routes(shared_state.clone()))
            .merge(order_detail_routes(shared_state.clone()))
            .merge(payment_routes(shared_state.clone()));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router
            .nest_service("/uploads", ServeDir::new(&shared_state.upload_dir))
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
