use crate::{
    domain::requests::product::{CreateProductRecord, CreateReviewRecord, UpdateProductRecord},
    model::product::{Product as ProductModel, Review as ReviewModel},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        req: &CreateProductRecord,
    ) -> Result<ProductModel, RepositoryError>;
    async fn update_product(
        &self,
        req: &UpdateProductRecord,
    ) -> Result<ProductModel, RepositoryError>;
    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError>;
    async fn create_review(&self, req: &CreateReviewRecord) -> Result<ReviewModel, RepositoryError>;
}
