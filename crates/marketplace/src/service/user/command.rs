use crate::{
    abstract_trait::user::{
        repository::{DynUserCommandRepository, DynUserQueryRepository},
        service::UserCommandServiceTrait,
    },
    domain::{
        requests::user::{
            CreateUserRecord, CreateUserRequest, UpdateStoreStatusRequest, UpdateUserRequest,
        },
        response::user::UserResponse,
    },
    model::user::{StoreStatus, User, UserRole},
    service::{load_actor, or_not_found},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, ServiceTracer},
};
use tracing::{Instrument, info};

pub struct UserCommandServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub hashing: DynHashing,
}

#[derive(Clone)]
pub struct UserCommandService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hashing: DynHashing,
    tracer: ServiceTracer,
}

fn parse_role(role: &str) -> Result<UserRole, ServiceError> {
    role.parse::<UserRole>().map_err(ServiceError::validation)
}

fn ensure_self_or_admin(actor: &User, target_id: i32) -> Result<(), ServiceError> {
    if actor.user_id == target_id || actor.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "You can only manage your own account".into(),
        ))
    }
}

fn email_taken(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::AlreadyExists(_) => {
            ServiceError::Repo(RepositoryError::Conflict("Email already registered".into()))
        }
        other => ServiceError::Repo(other),
    }
}

impl UserCommandService {
    pub fn new(deps: UserCommandServiceDeps, registry: &mut Registry) -> Self {
        let UserCommandServiceDeps {
            query,
            command,
            hashing,
        } = deps;

        Self {
            query,
            command,
            hashing,
            tracer: ServiceTracer::new("user_command_service", registry),
        }
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<i32>) -> Result<(), ServiceError> {
        match self.query.find_by_email(email).await? {
            Some(existing) if Some(existing.user_id) != owner => Err(ServiceError::Repo(
                RepositoryError::Conflict("Email already registered".into()),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl UserCommandServiceTrait for UserCommandService {
    async fn create_user(
        &self,
        req: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let ctx = self.tracer.start("create_user");

        let result = async {
            let role = match req.role.as_deref() {
                Some(role) => parse_role(role)?,
                None => UserRole::Buyer,
            };

            if role == UserRole::Admin {
                return Err(ServiceError::Forbidden(
                    "Admin accounts cannot be self-registered".into(),
                ));
            }

            self.ensure_email_free(&req.email, None).await?;

            let password = self.hashing.hash_password(&req.password).await?;
            let store = req.store.clone().unwrap_or_default();

            let record = CreateUserRecord {
                name: req.name.clone(),
                email: req.email.clone(),
                password,
                phone: req.phone.clone(),
                address: req.address.clone(),
                role: role.to_string(),
                store_name: store.name,
                store_address: store.address,
                store_category: store.category,
                store_phone: store.phone,
                profile_image: req.profile_image.clone(),
                category: req.category.clone(),
            };

            let user = self.command.create_user(&record).await.map_err(email_taken)?;
            info!("👤 Registered user {} as {}", user.user_id, user.role);

            Ok::<_, ServiceError>(ApiResponse::success(
                "User registered successfully",
                UserResponse::from(user),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Post, result, "User registered successfully")
    }

    async fn update_user(
        &self,
        actor_id: i32,
        id: i32,
        req: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let ctx = self.tracer.start("update_user");

        let result = async {
            let actor = load_actor(&self.query, actor_id).await?;
            ensure_self_or_admin(&actor, id)?;

            let existing = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

            if let Some(role) = req.role.as_deref() {
                let role = parse_role(role)?;
                if role == UserRole::Admin && !actor.is_admin() {
                    return Err(ServiceError::Forbidden(
                        "Only admins can grant the admin role".into(),
                    ));
                }
            }

            if let Some(email) = req.email.as_deref() {
                if !email.eq_ignore_ascii_case(&existing.email) {
                    self.ensure_email_free(email, Some(existing.user_id)).await?;
                }
            }

            let password_hash = match req.password.as_deref() {
                Some(password) => Some(self.hashing.hash_password(password).await?),
                None => None,
            };

            let record = req.merge_into(&existing, password_hash);
            let user = self.command.update_user(&record).await.map_err(email_taken)?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "User updated successfully",
                UserResponse::from(user),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Put, result, "User updated successfully")
    }

    async fn update_store_status(
        &self,
        actor_id: i32,
        id: i32,
        req: &UpdateStoreStatusRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let ctx = self.tracer.start("update_store_status");

        let result = async {
            let actor = load_actor(&self.query, actor_id).await?;
            if !actor.is_admin() {
                return Err(ServiceError::Forbidden(
                    "Only admins can change a store's status".into(),
                ));
            }

            let status = req
                .status
                .parse::<StoreStatus>()
                .map_err(ServiceError::validation)?;

            let user = self
                .command
                .update_store_status(id, status)
                .await
                .map_err(or_not_found("User"))?;

            info!("🏪 Store of user {} is now {}", user.user_id, status);

            Ok::<_, ServiceError>(ApiResponse::success(
                format!("Store status updated to {status}"),
                UserResponse::from(user),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Put, result, "Store status updated")
    }

    async fn delete_user(&self, actor_id: i32, id: i32) -> Result<(), ServiceError> {
        let ctx = self.tracer.start("delete_user");

        let result = async {
            let actor = load_actor(&self.query, actor_id).await?;
            ensure_self_or_admin(&actor, id)?;

            self.command
                .delete_user(id)
                .await
                .map_err(|err| match err {
                    RepositoryError::ForeignKey(_) => ServiceError::Repo(RepositoryError::Conflict(
                        "User still owns products or orders".to_string(),
                    )),
                    other => or_not_found("User")(other),
                })
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Delete, result, "User deleted successfully")
    }
}
