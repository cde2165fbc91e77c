use crate::{
    abstract_trait::{
        product::service::{DynProductCommandService, DynProductQueryService},
        upload::DynUploadService,
    },
    domain::{
        requests::product::{
            CreateProductRequest, CreateReviewRequest, FindAllProducts, UpdateProductRequest,
        },
        response::product::{ProductDetailResponse, ProductResponse, ReviewResponse},
    },
    middleware::{
        jwt::auth_middleware,
        validate::{
            FormFields, FormFile, SimpleValidatedJson, SimpleValidatedQuery, ValidatedJsonOrForm,
        },
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination},
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

impl FormFields for CreateProductRequest {
    const TYPED_FIELDS: &'static [&'static str] = &[
        "price",
        "discount_price",
        "original_price",
        "stock",
        "seller_id",
        "is_available",
        "checklist",
    ];
}

impl FormFields for UpdateProductRequest {
    const TYPED_FIELDS: &'static [&'static str] = &[
        "price",
        "discount_price",
        "original_price",
        "stock",
        "is_available",
        "checklist",
    ];
}

/// Stores the uploaded `image` and returns its public URL.
async fn store_listing_image(
    uploads: &DynUploadService,
    image: Option<FormFile>,
) -> Result<Option<String>, HttpError> {
    let Some(file) = image else {
        return Ok(None);
    };

    let stored = uploads
        .store_image(
            file.file_name.as_deref(),
            file.content_type.as_deref(),
            &file.bytes,
        )
        .await?;
    Ok(Some(stored.data.url))
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    params(FindAllProducts),
    responses(
        (status = 200, description = "List of products", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 400, description = "Invalid filter"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with seller and reviews", body = ApiResponse<ProductDetailResponse>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    request_body(
        content = CreateProductRequest,
        description = "JSON, or multipart/form-data with the same fields plus an optional `image` file"
    ),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Store not approved")
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(uploads): Extension<DynUploadService>,
    Extension(user_id): Extension<i32>,
    ValidatedJsonOrForm { mut body, image }: ValidatedJsonOrForm<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    if let Some(url) = store_listing_image(&uploads, image).await? {
        body.image_url = Some(url);
    }

    let response = service.create_product(user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body(
        content = UpdateProductRequest,
        description = "JSON, or multipart/form-data with the same fields plus an optional `image` file"
    ),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the product's seller"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(uploads): Extension<DynUploadService>,
    Extension(user_id): Extension<i32>,
    Path(id): Path<i32>,
    ValidatedJsonOrForm { mut body, image }: ValidatedJsonOrForm<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    if let Some(url) = store_listing_image(&uploads, image).await? {
        body.image_url = Some(url);
    }

    let response = service.update_product(user_id, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = serde_json::Value),
        (status = 403, description = "Not the product's seller"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(user_id): Extension<i32>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete_product(user_id, id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Product deleted successfully", ())),
    ))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/reviews",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review added", body = ApiResponse<ReviewResponse>),
        (status = 400, description = "Rating or comment missing"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_review(
    Extension(service): Extension<DynProductCommandService>,
    Extension(user_id): Extension<i32>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateReviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_review(user_id, id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public = OpenApiRouter::new()
        .route("/api/products", get(get_products))
        .route("/api/products/{id}", get(get_product))
        .layer(Extension(app_state.di_container.product_query.clone()));

    let protected = OpenApiRouter::new()
        .route("/api/products", post(create_product))
        .route(
            "/api/products/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/api/products/{id}/reviews", post(add_review))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.product_command.clone()))
        .layer(Extension(app_state.di_container.upload.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    public.merge(protected)
}
