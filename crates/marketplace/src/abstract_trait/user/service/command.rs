use crate::domain::{
    requests::user::{CreateUserRequest, UpdateStoreStatusRequest, UpdateUserRequest},
    response::user::UserResponse,
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynUserCommandService = Arc<dyn UserCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandServiceTrait {
    async fn create_user(
        &self,
        req: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn update_user(
        &self,
        actor_id: i32,
        id: i32,
        req: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn update_store_status(
        &self,
        actor_id: i32,
        id: i32,
        req: &UpdateStoreStatusRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn delete_user(&self, actor_id: i32, id: i32) -> Result<(), ServiceError>;
}
