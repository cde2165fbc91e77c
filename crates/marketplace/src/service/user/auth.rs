use crate::{
    abstract_trait::user::{repository::DynUserQueryRepository, service::AuthServiceTrait},
    domain::{
        requests::user::LoginRequest,
        response::user::{LoginResponse, UserResponse},
    },
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService, TokenKind},
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::{Instrument, info, warn};

pub struct AuthServiceDeps {
    pub query: DynUserQueryRepository,
    pub hashing: DynHashing,
    pub jwt_config: DynJwtService,
}

#[derive(Clone)]
pub struct AuthService {
    query: DynUserQueryRepository,
    hashing: DynHashing,
    jwt_config: DynJwtService,
    tracer: ServiceTracer,
}

impl AuthService {
    pub fn new(deps: AuthServiceDeps, registry: &mut Registry) -> Self {
        Self {
            query: deps.query,
            hashing: deps.hashing,
            jwt_config: deps.jwt_config,
            tracer: ServiceTracer::new("auth_service", registry),
        }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<LoginResponse>, ServiceError> {
        let ctx = self.tracer.start("login");

        let result = async {
            let Some(user) = self.query.find_by_email(&req.email).await? else {
                warn!("🔐 Login attempt for unknown email {}", req.email);
                return Err(ServiceError::InvalidCredentials);
            };

            self.hashing
                .compare_password(&user.password, &req.password)
                .await?;

            let access_token = self
                .jwt_config
                .generate_token(user.user_id, TokenKind::Access)?;

            info!("🔓 User {} logged in", user.user_id);

            Ok::<_, ServiceError>(ApiResponse::success(
                "Login successful",
                LoginResponse {
                    user: UserResponse::from(user),
                    access_token,
                    token_type: "Bearer".into(),
                },
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Post, result, "Login successful")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::user::{StoreStatus, UserRole, sample_user},
        testing::InMemory,
    };
    use shared::{
        abstract_trait::HashingTrait,
        config::{Hashing, JwtConfig},
    };
    use std::sync::Arc;

    async fn service_with_user(password: &str) -> (AuthService, DynJwtService) {
        let hashing = Hashing::with_cost(4);
        let mut user = sample_user(7, UserRole::Seller, StoreStatus::Approved);
        user.password = hashing.hash_password(password).await.unwrap();

        let mem = InMemory::default().with_user(user);
        let jwt: DynJwtService = Arc::new(JwtConfig::new("test-secret"));
        let mut registry = Registry::default();

        let svc = AuthService::new(
            AuthServiceDeps {
                query: Arc::new(mem),
                hashing: Arc::new(hashing),
                jwt_config: jwt.clone(),
            },
            &mut registry,
        );
        (svc, jwt)
    }

    #[tokio::test]
    async fn valid_login_issues_access_token_for_user() {
        let (svc, jwt) = service_with_user("rahasia123").await;

        let res = svc
            .login(&LoginRequest {
                email: "user7@example.com".into(),
                password: "rahasia123".into(),
            })
            .await
            .unwrap();

        assert_eq!(res.data.user.id, 7);
        assert_eq!(
            jwt.verify_token(&res.data.access_token, TokenKind::Access)
                .unwrap(),
            7
        );
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_both_invalid_credentials() {
        let (svc, _) = service_with_user("rahasia123").await;

        let err = svc
            .login(&LoginRequest {
                email: "user7@example.com".into(),
                password: "salah".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));

        let err = svc
            .login(&LoginRequest {
                email: "nobody@example.com".into(),
                password: "rahasia123".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }
}
