use crate::{
    abstract_trait::order_detail::{
        repository::DynOrderDetailQueryRepository, service::OrderDetailQueryServiceTrait,
    },
    domain::{
        requests::order_detail::FindAllOrderDetails, response::order_detail::OrderDetailResponse,
    },
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::Instrument;

#[derive(Clone)]
pub struct OrderDetailQueryService {
    query: DynOrderDetailQueryRepository,
    tracer: ServiceTracer,
}

impl OrderDetailQueryService {
    pub fn new(query: DynOrderDetailQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            tracer: ServiceTracer::new("order_detail_query_service", registry),
        }
    }

    async fn list(
        &self,
        order_id: Option<i32>,
    ) -> Result<ApiResponse<Vec<OrderDetailResponse>>, ServiceError> {
        let details = self.query.find_all(order_id).await?;

        Ok(ApiResponse::success(
            "Order details retrieved successfully",
            details.into_iter().map(OrderDetailResponse::from).collect(),
        ))
    }
}

#[async_trait]
impl OrderDetailQueryServiceTrait for OrderDetailQueryService {
    async fn find_all(
        &self,
        req: &FindAllOrderDetails,
    ) -> Result<ApiResponse<Vec<OrderDetailResponse>>, ServiceError> {
        let ctx = self.tracer.start("find_all_order_details");

        let result = self.list(req.order_id).instrument(ctx.span.clone()).await;

        self.tracer
            .finish(&ctx, Method::Get, result, "Order details retrieved")
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let ctx = self.tracer.start("find_order_detail_by_id");

        let result = async {
            let detail = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Order detail not found".into()))?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Order detail retrieved successfully",
                OrderDetailResponse::from(detail),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Get, result, "Order detail retrieved")
    }

    async fn find_by_order_id(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<Vec<OrderDetailResponse>>, ServiceError> {
        let ctx = self.tracer.start("find_order_details_by_order");

        let result = self.list(Some(order_id)).instrument(ctx.span.clone()).await;

        self.tracer
            .finish(&ctx, Method::Get, result, "Order details retrieved")
    }
}
