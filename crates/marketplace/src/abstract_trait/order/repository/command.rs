use crate::{
    domain::requests::order::CreateOrderRecord,
    model::{
        order::{DeliveryStatus, Order as OrderModel, OrderStatus},
        order_detail::OrderDetail as OrderDetailModel,
    },
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Locks the product row, reserves stock and writes the order with its
    /// detail snapshot in one transaction.
    async fn create_order(
        &self,
        req: &CreateOrderRecord,
    ) -> Result<(OrderModel, OrderDetailModel), RepositoryError>;
    /// Never touches stock and never moves an order out of `cancelled`.
    async fn update_status(
        &self,
        id: i32,
        status: OrderStatus,
    ) -> Result<OrderModel, RepositoryError>;
    async fn update_delivery_status(
        &self,
        id: i32,
        status: DeliveryStatus,
    ) -> Result<OrderModel, RepositoryError>;
    /// Returns the cancelled order and the quantity given back to the product.
    async fn cancel_order(&self, id: i32) -> Result<(OrderModel, i32), RepositoryError>;
    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError>;
}
