use crate::domain::{
    requests::product::{CreateProductRequest, CreateReviewRequest, UpdateProductRequest},
    response::product::{ProductResponse, ReviewResponse},
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        actor_id: i32,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        actor_id: i32,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete_product(&self, actor_id: i32, id: i32) -> Result<(), ServiceError>;
    async fn add_review(
        &self,
        actor_id: i32,
        product_id: i32,
        req: &CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError>;
}
