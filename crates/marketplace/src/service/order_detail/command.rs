use crate::{
    abstract_trait::order_detail::{
        repository::{DynOrderDetailCommandRepository, DynOrderDetailQueryRepository},
        service::OrderDetailCommandServiceTrait,
    },
    domain::{
        requests::order_detail::UpdateOrderDetailRequest,
        response::order_detail::OrderDetailResponse,
    },
    service::or_not_found,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::Instrument;

pub struct OrderDetailCommandServiceDeps {
    pub query: DynOrderDetailQueryRepository,
    pub command: DynOrderDetailCommandRepository,
}

#[derive(Clone)]
pub struct OrderDetailCommandService {
    query: DynOrderDetailQueryRepository,
    command: DynOrderDetailCommandRepository,
    tracer: ServiceTracer,
}

impl OrderDetailCommandService {
    pub fn new(deps: OrderDetailCommandServiceDeps, registry: &mut Registry) -> Self {
        Self {
            query: deps.query,
            command: deps.command,
            tracer: ServiceTracer::new("order_detail_command_service", registry),
        }
    }
}

#[async_trait]
impl OrderDetailCommandServiceTrait for OrderDetailCommandService {
    async fn update_detail(
        &self,
        id: i32,
        req: &UpdateOrderDetailRequest,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let ctx = self.tracer.start("update_order_detail");

        let result = async {
            let existing = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Order detail not found".into()))?;

            let detail = self
                .command
                .update_detail(&req.apply_to(&existing))
                .await
                .map_err(or_not_found("Order detail"))?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Order detail updated successfully",
                OrderDetailResponse::from(detail),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Put, result, "Order detail updated")
    }

    async fn delete_detail(&self, id: i32) -> Result<(), ServiceError> {
        let ctx = self.tracer.start("delete_order_detail");

        let result = self
            .command
            .delete_detail(id)
            .instrument(ctx.span.clone())
            .await
            .map_err(or_not_found("Order detail"));

        self.tracer
            .finish(&ctx, Method::Delete, result, "Order detail deleted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::order_detail::OrderDetail, testing::InMemory};
    use std::sync::Arc;

    fn detail(discount_price: Option<i64>) -> OrderDetail {
        OrderDetail {
            order_detail_id: 3,
            order_id: 1,
            product_id: Some(1),
            product_name: "Kue Lapis".into(),
            product_image: None,
            quantity: 2,
            unit_price: 10_000,
            discount_price,
            total_price: 0,
            seller_id: 20,
            seller_name: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn edit_persists_and_missing_detail_is_404() {
        let mem = InMemory::default().with_detail(detail(None));
        let mut registry = Registry::default();
        let svc = OrderDetailCommandService::new(
            OrderDetailCommandServiceDeps {
                query: Arc::new(mem.clone()),
                command: Arc::new(mem.clone()),
            },
            &mut registry,
        );

        let res = svc
            .update_detail(
                3,
                &UpdateOrderDetailRequest {
                    quantity: Some(1),
                    unit_price: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(res.data.total_price, 10_000);

        let err = svc.delete_detail(99).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Order detail not found"));
    }
}
