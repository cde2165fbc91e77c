use crate::{
    abstract_trait::order::{
        repository::{DynOrderCommandRepository, DynOrderQueryRepository},
        service::OrderCommandServiceTrait,
    },
    domain::{
        requests::order::{
            CreateOrderRecord, CreateOrderRequest, UpdateDeliveryStatusRequest,
            UpdateOrderStatusRequest,
        },
        response::order::{CancelOrderResponse, CreateOrderResponse, OrderResponse},
    },
    model::order::{DeliveryStatus, Order, OrderStatus},
    service::or_not_found,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use tracing::{Instrument, info};

const DEFAULT_DELIVERY_METHOD: &str = "pickup";

pub struct OrderCommandServiceDeps {
    pub query: DynOrderQueryRepository,
    pub command: DynOrderCommandRepository,
}

#[derive(Clone)]
pub struct OrderCommandService {
    query: DynOrderQueryRepository,
    command: DynOrderCommandRepository,
    tracer: ServiceTracer,
}

impl OrderCommandService {
    pub fn new(deps: OrderCommandServiceDeps, registry: &mut Registry) -> Self {
        Self {
            query: deps.query,
            command: deps.command,
            tracer: ServiceTracer::new("order_command_service", registry),
        }
    }

    async fn respond_with_tracking(&self, order: Order) -> Result<OrderResponse, ServiceError> {
        let tracking = self.query.find_tracking(&[order.order_id]).await?;
        Ok(OrderResponse::with_tracking(order, &tracking))
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        buyer_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<CreateOrderResponse>, ServiceError> {
        let ctx = self.tracer.start("create_order");

        let result = async {
            let status = match req.status.as_deref() {
                Some(raw) => raw.parse::<OrderStatus>().map_err(ServiceError::validation)?,
                None => OrderStatus::Pending,
            };

            if !status.is_initial() {
                return Err(ServiceError::validation(format!(
                    "Orders cannot be created as {status}"
                )));
            }

            let delivery_method = req
                .delivery_method
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_DELIVERY_METHOD)
                .to_string();

            let record = CreateOrderRecord {
                buyer_id,
                product_id: req.product_id,
                quantity: req.quantity,
                delivery_method,
                pickup_time: req.pickup_time.clone(),
                delivery_address: req.delivery_address.clone(),
                delivery_fee: req.delivery_fee.unwrap_or(0),
                status: status.to_string(),
                notes: req.notes.clone(),
                payment_method: req.payment_method.clone(),
            };

            let (order, detail) = self
                .command
                .create_order(&record)
                .await
                .map_err(or_not_found("Product"))?;

            info!(
                "🧾 Order {} placed by buyer {} for {} x {}",
                order.order_id, buyer_id, detail.quantity, detail.product_name
            );

            Ok::<_, ServiceError>(ApiResponse::success(
                "Order created and stock reserved",
                CreateOrderResponse::new(order, detail),
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Post, result, "Order created and stock reserved")
    }

    async fn update_status(
        &self,
        id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let ctx = self.tracer.start("update_order_status");

        let result = async {
            let target = req
                .status
                .parse::<OrderStatus>()
                .map_err(ServiceError::validation)?;

            if !target.is_assignable() {
                return Err(ServiceError::validation(format!(
                    "Invalid order status: {target}"
                )));
            }

            let current = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Order not found".into()))?;

            current
                .status()
                .and_then(|status| status.check_transition(target))
                .map_err(ServiceError::validation)?;

            let (order, message) = if target == OrderStatus::Cancelled {
                let (order, restored) = self
                    .command
                    .cancel_order(id)
                    .await
                    .map_err(or_not_found("Order"))?;
                info!("🔁 Order {} cancelled via status update, {} restored", id, restored);
                (order, "Order cancelled and stock restored".to_string())
            } else {
                let order = self
                    .command
                    .update_status(id, target)
                    .await
                    .map_err(or_not_found("Order"))?;
                (order, format!("Order status updated to {target}"))
            };

            let data = self.respond_with_tracking(order).await?;
            Ok::<_, ServiceError>(ApiResponse::success(message, data))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Put, result, "Order status updated")
    }

    async fn update_delivery_status(
        &self,
        id: i32,
        req: &UpdateDeliveryStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let ctx = self.tracer.start("update_delivery_status");

        let result = async {
            let status = req
                .delivery_status
                .parse::<DeliveryStatus>()
                .map_err(ServiceError::validation)?;

            let order = self
                .command
                .update_delivery_status(id, status)
                .await
                .map_err(or_not_found("Order"))?;

            let data = self.respond_with_tracking(order).await?;
            Ok::<_, ServiceError>(ApiResponse::success(
                format!("Delivery status updated to {status}"),
                data,
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Put, result, "Delivery status updated")
    }

    async fn cancel_order(
        &self,
        id: i32,
    ) -> Result<ApiResponse<CancelOrderResponse>, ServiceError> {
        let ctx = self.tracer.start("cancel_order");

        let result = async {
            let (order, restored) = self
                .command
                .cancel_order(id)
                .await
                .map_err(or_not_found("Order"))?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Order cancelled and stock restored",
                CancelOrderResponse {
                    order_id: order.order_id,
                    status: order.status,
                    restored_quantity: restored,
                },
            ))
        }
        .instrument(ctx.span.clone())
        .await;

        self.tracer
            .finish(&ctx, Method::Put, result, "Order cancelled")
    }

    async fn delete_order(&self, id: i32) -> Result<(), ServiceError> {
        let ctx = self.tracer.start("delete_order");

        let result = self
            .command
            .delete_order(id)
            .instrument(ctx.span.clone())
            .await
            .map_err(or_not_found("Order"));

        self.tracer
            .finish(&ctx, Method::Delete, result, "Order deleted successfully")
    }
}
