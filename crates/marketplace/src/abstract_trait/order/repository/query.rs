use crate::{
    domain::requests::order::FindAllOrders,
    model::order::{Order as OrderModel, OrderStatusSummary, OrderTracking},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_all(&self, req: &FindAllOrders)
    -> Result<(Vec<OrderModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError>;
    async fn find_tracking(&self, order_ids: &[i32]) -> Result<Vec<OrderTracking>, RepositoryError>;
    async fn summarize_by_status(
        &self,
        seller_id: Option<i32>,
    ) -> Result<Vec<OrderStatusSummary>, RepositoryError>;
}
