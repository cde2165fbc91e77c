use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::{DynJwtService, TokenKind},
    errors::{ErrorResponse, ServiceError},
};
use tracing::warn;

fn unauthorized(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            status: "error".to_string(),
            message: message.to_string(),
        }),
    )
}

/// Resolves the caller from the `token` cookie or a Bearer header and
/// stores their id as an `i32` request extension.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
        .ok_or_else(|| unauthorized("You are not logged in, please provide token"))?;

    let user_id = jwt
        .verify_token(&token, TokenKind::Access)
        .map_err(|err| {
            warn!("🔒 Rejected token on {}: {err}", req.uri().path());
            match err {
                ServiceError::TokenExpired => unauthorized("Token expired"),
                _ => unauthorized("Invalid token"),
            }
        })?;

    req.extensions_mut().insert(user_id);

    Ok(next.run(req).await)
}
