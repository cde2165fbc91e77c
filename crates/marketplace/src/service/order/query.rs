use crate::{
    abstract_trait::{
        order::{repository::DynOrderQueryRepository, service::OrderQueryServiceTrait},
        order_detail::repository::DynOrderDetailQueryRepository,
    },
    domain::{
        requests::order::{FindAllOrders, OrderStatsQuery},
        response::order::{OrderStatsResponse, OrderWithDetailsResponse},
    },
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination, Pagination},
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::Instrument;

pub struct OrderQueryServiceDeps {
    pub query: DynOrderQueryRepository,
    pub details: DynOrderDetailQueryRepository,
}

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    details: DynOrderDetailQueryRepository,
    tracer: ServiceTracer,
}

impl OrderQueryService {
    pub fn new(deps: OrderQueryServiceDeps, registry: &mut Registry) -> Self {
        Self {
            query: deps.query,
            details: deps.details,
            tracer: ServiceTracer::new("order_query_service", registry),
        }
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderWithDetailsResponse>>, ServiceError> {
        let ctx = self.tracer.start("find_all_orders");

        let result = async {
            let (orders, total) = self.query.find_all(req).await?;
            let ids: Vec<i32> = orders.iter().map(|o| o.order_id).collect();

            let tracking = self.query.find_tracking(&ids).await?;
            let details = self.details.find_by_order_ids(&ids).await?;

            Ok::<_, ServiceError>(ApiResponsePagination::success(
                "Orders retrieved successfully",
                OrderWithDetailsResponse::assemble(orders, &tracking, &details),
                Pagination::new(req.page, req.page_size, total),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Get, result, "Orders retrieved successfully")
    }

    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<ApiResponse<OrderWithDetailsResponse>, ServiceError> {
        let ctx = self.tracer.start("find_order_by_id");

        let result = async {
            let order = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Order not found".into()))?;

            let tracking = self.query.find_tracking(&[id]).await?;
            let details = self.details.find_by_order_ids(&[id]).await?;

            let data = OrderWithDetailsResponse::assemble(vec![order], &tracking, &details)
                .pop()
                .ok_or_else(|| ServiceError::Internal("Order vanished while assembling".into()))?;

            Ok::<_, ServiceError>(ApiResponse::success("Order retrieved successfully", data))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Get, result, "Order retrieved successfully")
    }

    async fn stats(
        &self,
        req: &OrderStatsQuery,
    ) -> Result<ApiResponse<Vec<OrderStatsResponse>>, ServiceError> {
        let ctx = self.tracer.start("order_stats");

        let result = async {
            let summary = self.query.summarize_by_status(req.seller_id).await?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Order statistics retrieved successfully",
                summary.into_iter().map(OrderStatsResponse::from).collect(),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Get, result, "Order statistics retrieved")
    }
}
