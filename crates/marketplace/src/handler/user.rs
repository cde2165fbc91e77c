use crate::{
    abstract_trait::{
        upload::DynUploadService,
        user::service::{DynAuthService, DynUserCommandService, DynUserQueryService},
    },
    domain::{
        requests::user::{
            CreateUserRequest, FindAllUsers, FindSellers, LoginRequest, UpdateStoreStatusRequest,
            UpdateUserRequest,
        },
        response::{
            upload::UploadResponse,
            user::{LoginResponse, UserResponse},
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
    extract::{Extension, Multipart, Path},
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

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "User",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register_user(
    Extension(service): Extension<DynUserCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_user(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "User",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login_user(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.login(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/users/sellers",
    tag = "User",
    params(FindSellers),
    responses(
        (status = 200, description = "Sellers", body = ApiResponsePagination<Vec<UserResponse>>)
    )
)]
pub async fn get_sellers(
    Extension(service): Extension<DynUserQueryService>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindSellers>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_sellers(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "User",
    security(("bearer_auth" = [])),
    params(FindAllUsers),
    responses(
        (status = 200, description = "List of users", body = ApiResponsePagination<Vec<UserResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_users(
    Extension(service): Extension<DynUserQueryService>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllUsers>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(service): Extension<DynUserQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResponse>),
        (status = 403, description = "Cannot edit another account"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_user(
    Extension(service): Extension<DynUserCommandService>,
    Extension(user_id): Extension<i32>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_user(user_id, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/store/status",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Seller ID")),
    request_body = UpdateStoreStatusRequest,
    responses(
        (status = 200, description = "Store status changed", body = ApiResponse<UserResponse>),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_store_status(
    Extension(service): Extension<DynUserCommandService>,
    Extension(user_id): Extension<i32>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateStoreStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_store_status(user_id, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = serde_json::Value),
        (status = 403, description = "Cannot delete another account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(service): Extension<DynUserCommandService>,
    Extension(user_id): Extension<i32>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete_user(user_id, id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("User deleted successfully", ())),
    ))
}

#[utoipa::path(
    post,
    path = "/api/users/upload-profile-image",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body(content = String, content_type = "multipart/form-data", description = "Image in the `image` field"),
    responses(
        (status = 201, description = "Image stored", body = ApiResponse<UploadResponse>),
        (status = 400, description = "Missing, oversized or unsupported file")
    )
)]
pub async fn upload_profile_image(
    Extension(service): Extension<DynUploadService>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.file_name().is_none() && field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| HttpError::BadRequest(format!("Failed to read upload: {e}")))?;

        let response = service
            .store_image(file_name.as_deref(), content_type.as_deref(), &bytes)
            .await?;
        return Ok((StatusCode::CREATED, Json(response)));
    }

    Err(HttpError::BadRequest("No file uploaded".into()))
}

pub fn user_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    let public = OpenApiRouter::new()
        .route("/api/users", post(register_user))
        .route("/api/users/login", post(login_user))
        .route("/api/users/sellers", get(get_sellers))
        .layer(Extension(di.user_command.clone()))
        .layer(Extension(di.user_query.clone()))
        .layer(Extension(di.auth.clone()));

    let protected = OpenApiRouter::new()
        .route("/api/users", get(get_users))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/{id}/store/status", put(update_store_status))
        .route(
            "/api/users/upload-profile-image",
            post(upload_profile_image),
        )
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(di.user_command.clone()))
        .layer(Extension(di.user_query.clone()))
        .layer(Extension(di.upload.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    public.merge(protected)
}
