use crate::{
    domain::response::order_detail::OrderDetailResponse,
    model::{
        order::{Order, OrderStatusSummary, OrderTracking},
        order_detail::OrderDetail,
    },
};
use serde::{Deserialize, Serialize};
use shared::utils::format_datetime;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrackingResponse {
    pub status: String,
    pub time: String,
}

impl From<OrderTracking> for TrackingResponse {
    fn from(value: OrderTracking) -> Self {
        TrackingResponse {
            status: value.status,
            time: format_datetime(&value.time),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub buyer_id: i32,
    pub product_id: Option<i32>,
    pub seller_id: i32,
    pub quantity: i32,
    pub delivery_method: String,
    pub pickup_time: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_fee: i64,
    pub delivery_status: String,
    pub tracking: Vec<TrackingResponse>,
    pub status: String,
    pub notes: Option<String>,
    pub payment_method: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl OrderResponse {
    /// `tracking` may hold entries of other orders; only this order's are kept.
    pub fn with_tracking(value: Order, tracking: &[OrderTracking]) -> Self {
        let order_id = value.order_id;
        let mut response = OrderResponse::from(value);
        response.tracking = tracking
            .iter()
            .filter(|t| t.order_id == order_id)
            .cloned()
            .map(Into::into)
            .collect();
        response
    }
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse {
            id: value.order_id,
            buyer_id: value.buyer_id,
            product_id: value.product_id,
            seller_id: value.seller_id,
            quantity: value.quantity,
            delivery_method: value.delivery_method,
            pickup_time: value.pickup_time,
            delivery_address: value.delivery_address,
            delivery_fee: value.delivery_fee,
            delivery_status: value.delivery_status,
            tracking: Vec::new(),
            status: value.status,
            notes: value.notes,
            payment_method: value.payment_method,
            created_at: value.created_at.as_ref().map(format_datetime),
            updated_at: value.updated_at.as_ref().map(format_datetime),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderWithDetailsResponse {
    pub order: OrderResponse,
    pub order_details: Vec<OrderDetailResponse>,
}

impl OrderWithDetailsResponse {
    /// Joins each order with its own rows out of batch-loaded tracking and details.
    pub fn assemble(
        orders: Vec<Order>,
        tracking: &[OrderTracking],
        details: &[OrderDetail],
    ) -> Vec<Self> {
        orders
            .into_iter()
            .map(|order| {
                let order_id = order.order_id;
                OrderWithDetailsResponse {
                    order: OrderResponse::with_tracking(order, tracking),
                    order_details: details
                        .iter()
                        .filter(|d| d.order_id == order_id)
                        .cloned()
                        .map(Into::into)
                        .collect(),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailSummaryResponse {
    pub id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub total_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub id: i32,
    pub buyer_id: i32,
    pub product_id: Option<i32>,
    pub quantity: i32,
    pub status: String,
    pub order_detail: OrderDetailSummaryResponse,
}

impl CreateOrderResponse {
    pub fn new(order: Order, detail: OrderDetail) -> Self {
        CreateOrderResponse {
            id: order.order_id,
            buyer_id: order.buyer_id,
            product_id: order.product_id,
            quantity: order.quantity,
            status: order.status,
            order_detail: OrderDetailSummaryResponse {
                id: detail.order_detail_id,
                product_name: detail.product_name,
                quantity: detail.quantity,
                total_price: detail.total_price,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CancelOrderResponse {
    pub order_id: i32,
    pub status: String,
    pub restored_quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderStatsResponse {
    pub status: String,
    pub count: i64,
    pub total_amount: i64,
}

impl From<OrderStatusSummary> for OrderStatsResponse {
    fn from(value: OrderStatusSummary) -> Self {
        OrderStatsResponse {
            status: value.status,
            count: value.count,
            total_amount: value.total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::order::{OrderStatus, sample_order};
    use chrono::NaiveDate;

    fn detail(order_detail_id: i32, order_id: i32) -> OrderDetail {
        OrderDetail {
            order_detail_id,
            order_id,
            product_id: Some(1),
            product_name: "Roti".into(),
            product_image: None,
            quantity: 1,
            unit_price: 5_000,
            discount_price: None,
            total_price: 5_000,
            seller_id: 20,
            seller_name: None,
            created_at: None,
        }
    }

    #[test]
    fn assemble_attaches_only_matching_rows() {
        let time = NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap();

        let orders = vec![
            sample_order(1, 1, 1, OrderStatus::Pending),
            sample_order(2, 1, 1, OrderStatus::Pending),
        ];
        let tracking = vec![OrderTracking {
            tracking_id: 1,
            order_id: 2,
            status: "on_delivery".into(),
            time,
        }];
        let details = vec![detail(10, 1), detail(11, 2), detail(12, 2)];

        let assembled = OrderWithDetailsResponse::assemble(orders, &tracking, &details);

        assert_eq!(assembled.len(), 2);
        assert_eq!(assembled[0].order_details.len(), 1);
        assert!(assembled[0].order.tracking.is_empty());
        assert_eq!(assembled[1].order_details.len(), 2);
        assert_eq!(assembled[1].order.tracking[0].status, "on_delivery");
    }
}
