use crate::{
    abstract_trait::order_detail::service::{
        DynOrderDetailCommandService, DynOrderDetailQueryService,
    },
    domain::{
        requests::order_detail::{FindAllOrderDetails, UpdateOrderDetailRequest},
        response::order_detail::OrderDetailResponse,
    },
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use shared::{domain::responses::ApiResponse, errors::HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/order-details",
    tag = "Order-detail",
    security(("bearer_auth" = [])),
    params(FindAllOrderDetails),
    responses(
        (status = 200, description = "Order details", body = ApiResponse<Vec<OrderDetailResponse>>)
    )
)]
pub async fn get_order_details(
    Extension(service): Extension<DynOrderDetailQueryService>,
    Query(params): Query<FindAllOrderDetails>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/order-details/{id}",
    tag = "Order-detail",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order detail ID")),
    responses(
        (status = 200, description = "Order detail", body = ApiResponse<OrderDetailResponse>),
        (status = 404, description = "Order detail not found")
    )
)]
pub async fn get_order_detail(
    Extension(service): Extension<DynOrderDetailQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/order-details/order/{order_id}",
    tag = "Order-detail",
    security(("bearer_auth" = [])),
    params(("order_id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Details of one order", body = ApiResponse<Vec<OrderDetailResponse>>)
    )
)]
pub async fn get_details_by_order(
    Extension(service): Extension<DynOrderDetailQueryService>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_order_id(order_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/order-details/{id}",
    tag = "Order-detail",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order detail ID")),
    request_body = UpdateOrderDetailRequest,
    responses(
        (status = 200, description = "Order detail updated", body = ApiResponse<OrderDetailResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Order detail not found")
    )
)]
pub async fn update_order_detail(
    Extension(service): Extension<DynOrderDetailCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderDetailRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_detail(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/order-details/{id}",
    tag = "Order-detail",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order detail ID")),
    responses(
        (status = 200, description = "Order detail deleted", body = serde_json::Value),
        (status = 404, description = "Order detail not found")
    )
)]
pub async fn delete_order_detail(
    Extension(service): Extension<DynOrderDetailCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete_detail(id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Order detail deleted successfully", ())),
    ))
}

pub fn order_detail_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/order-details", get(get_order_details))
        .route(
            "/api/order-details/{id}",
            get(get_order_detail)
                .put(update_order_detail)
                .delete(delete_order_detail),
        )
        .route(
            "/api/order-details/order/{order_id}",
            get(get_details_by_order),
        )
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order_detail_query.clone()))
        .layer(Extension(app_state.di_container.order_detail_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
