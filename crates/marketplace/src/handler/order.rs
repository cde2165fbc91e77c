use crate::{
    abstract_trait::order::service::{DynOrderCommandService, DynOrderQueryService},
    domain::{
        requests::order::{
            CreateOrderRequest, FindAllOrders, OrderStatsQuery, UpdateDeliveryStatusRequest,
            UpdateOrderStatusRequest,
        },
        response::order::{
            CancelOrderResponse, CreateOrderResponse, OrderResponse, OrderStatsResponse,
            OrderWithDetailsResponse,
        },
    },
    middleware::{
        jwt::auth_middleware,
        validate::{SimpleValidatedJson, SimpleValidatedQuery},
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination},
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created and stock reserved", body = ApiResponse<CreateOrderResponse>),
        (status = 400, description = "Validation error or insufficient stock"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(user_id): Extension<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_order(user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "Orders with their details", body = ApiResponsePagination<Vec<OrderWithDetailsResponse>>)
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/stats/summary",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(OrderStatsQuery),
    responses(
        (status = 200, description = "Count and amount per status", body = ApiResponse<Vec<OrderStatsResponse>>)
    )
)]
pub async fn get_order_stats(
    Extension(service): Extension<DynOrderQueryService>,
    Query(params): Query<OrderStatsQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.stats(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with details", body = ApiResponse<OrderWithDetailsResponse>),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Status not allowed"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order_status(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_status(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/delivery-status",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateDeliveryStatusRequest,
    responses(
        (status = 200, description = "Delivery status updated", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Delivery status not allowed"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_delivery_status(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateDeliveryStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_delivery_status(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/cancel",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled and stock restored", body = ApiResponse<CancelOrderResponse>),
        (status = 400, description = "Order cannot be cancelled"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn cancel_order(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.cancel_order(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order deleted", body = serde_json::Value),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete_order(id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Order deleted successfully", ())),
    ))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders", get(get_orders).post(create_order))
        .route("/api/orders/stats/summary", get(get_order_stats))
        .route("/api/orders/{id}", get(get_order).delete(delete_order))
        .route("/api/orders/{id}/status", put(update_order_status))
        .route(
            "/api/orders/{id}/delivery-status",
            put(update_delivery_status),
        )
        .route("/api/orders/{id}/cancel", put(cancel_order))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.order_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
