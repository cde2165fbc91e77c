use crate::model::order_detail::OrderDetail;
use serde::{Deserialize, Serialize};
use shared::utils::format_datetime;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailResponse {
    pub id: i32,
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub product_name: String,
    pub product_image: Option<String>,
    pub quantity: i32,
    pub unit_price: i64,
    pub discount_price: Option<i64>,
    pub total_price: i64,
    pub seller_id: i32,
    pub seller_name: Option<String>,
    pub created_at: Option<String>,
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(value: OrderDetail) -> Self {
        OrderDetailResponse {
            id: value.order_detail_id,
            order_id: value.order_id,
            product_id: value.product_id,
            product_name: value.product_name,
            product_image: value.product_image,
            quantity: value.quantity,
            unit_price: value.unit_price,
            discount_price: value.discount_price,
            total_price: value.total_price,
            seller_id: value.seller_id,
            seller_name: value.seller_name,
            created_at: value.created_at.as_ref().map(format_datetime),
        }
    }
}
