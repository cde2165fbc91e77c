use crate::{
    domain::requests::user::{CreateUserRecord, UpdateUserRecord},
    model::user::{StoreStatus, User as UserModel},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<UserModel, RepositoryError>;
    async fn update_user(&self, req: &UpdateUserRecord) -> Result<UserModel, RepositoryError>;
    async fn update_store_status(
        &self,
        id: i32,
        status: StoreStatus,
    ) -> Result<UserModel, RepositoryError>;
    async fn delete_user(&self, id: i32) -> Result<(), RepositoryError>;
}
