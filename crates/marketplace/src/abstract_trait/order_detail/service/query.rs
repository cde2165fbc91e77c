use crate::domain::{
    requests::order_detail::FindAllOrderDetails, response::order_detail::OrderDetailResponse,
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynOrderDetailQueryService = Arc<dyn OrderDetailQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderDetailQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllOrderDetails,
    ) -> Result<ApiResponse<Vec<OrderDetailResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
    async fn find_by_order_id(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<Vec<OrderDetailResponse>>, ServiceError>;
}
