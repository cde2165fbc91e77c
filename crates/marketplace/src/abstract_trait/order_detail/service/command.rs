use crate::domain::{
    requests::order_detail::UpdateOrderDetailRequest, response::order_detail::OrderDetailResponse,
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynOrderDetailCommandService = Arc<dyn OrderDetailCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderDetailCommandServiceTrait {
    async fn update_detail(
        &self,
        id: i32,
        req: &UpdateOrderDetailRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
    async fn delete_detail(&self, id: i32) -> Result<(), ServiceError>;
}
