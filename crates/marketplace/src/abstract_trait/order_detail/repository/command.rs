use crate::{
    domain::requests::order_detail::UpdateOrderDetailRecord,
    model::order_detail::OrderDetail as OrderDetailModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderDetailCommandRepository =
    Arc<dyn OrderDetailCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderDetailCommandRepositoryTrait {
    async fn update_detail(
        &self,
        req: &UpdateOrderDetailRecord,
    ) -> Result<OrderDetailModel, RepositoryError>;
    async fn delete_detail(&self, id: i32) -> Result<(), RepositoryError>;
}
