use crate::domain::{
    requests::order::{CreateOrderRequest, UpdateDeliveryStatusRequest, UpdateOrderStatusRequest},
    response::order::{CancelOrderResponse, CreateOrderResponse, OrderResponse},
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(
        &self,
        buyer_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<CreateOrderResponse>, ServiceError>;
    async fn update_status(
        &self,
        id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn update_delivery_status(
        &self,
        id: i32,
        req: &UpdateDeliveryStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn cancel_order(&self, id: i32)
    -> Result<ApiResponse<CancelOrderResponse>, ServiceError>;
    async fn delete_order(&self, id: i32) -> Result<(), ServiceError>;
}
