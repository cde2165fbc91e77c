use crate::domain::{
    requests::order::{FindAllOrders, OrderStatsQuery},
    response::order::{OrderStatsResponse, OrderWithDetailsResponse},
};
use async_trait::async_trait;
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination},
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderWithDetailsResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<ApiResponse<OrderWithDetailsResponse>, ServiceError>;
    async fn stats(
        &self,
        req: &OrderStatsQuery,
    ) -> Result<ApiResponse<Vec<OrderStatsResponse>>, ServiceError>;
}
