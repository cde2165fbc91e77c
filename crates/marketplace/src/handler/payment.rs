use crate::{
    abstract_trait::payment::DynPaymentService,
    domain::{requests::payment::CreateTransactionRequest, response::payment::SnapTokenResponse},
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use shared::{domain::responses::ApiResponse, errors::HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/payments/create-transaction",
    tag = "Payment",
    security(("bearer_auth" = [])),
    request_body = CreateTransactionRequest,
    responses(
        (status = 200, description = "Snap checkout token", body = ApiResponse<SnapTokenResponse>),
        (status = 400, description = "Validation error"),
        (status = 503, description = "Payment gateway unavailable")
    )
)]
pub async fn create_transaction(
    Extension(service): Extension<DynPaymentService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateTransactionRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_transaction(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn payment_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/payments/create-transaction", post(create_transaction))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.payment.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
