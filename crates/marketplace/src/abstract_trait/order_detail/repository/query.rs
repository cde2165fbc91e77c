use crate::model::order_detail::OrderDetail as OrderDetailModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderDetailQueryRepository = Arc<dyn OrderDetailQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderDetailQueryRepositoryTrait {
    async fn find_all(
        &self,
        order_id: Option<i32>,
    ) -> Result<Vec<OrderDetailModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderDetailModel>, RepositoryError>;
    async fn find_by_order_ids(
        &self,
        order_ids: &[i32],
    ) -> Result<Vec<OrderDetailModel>, RepositoryError>;
}
