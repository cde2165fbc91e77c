use crate::domain::requests::{default_page, default_page_size};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllOrders {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: i32,

    pub buyer_id: Option<i32>,
    pub seller_id: Option<i32>,
    pub status: Option<String>,
    pub delivery_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "Product id is required"))]
    #[schema(example = 1)]
    pub product_id: i32,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 2)]
    pub quantity: i32,

    /// Defaults to `pickup`.
    #[validate(length(min = 1, max = 30, message = "Delivery method must be 1-30 characters"))]
    #[schema(example = "pickup")]
    pub delivery_method: Option<String>,

    #[schema(example = "17:00 - 18:00")]
    pub pickup_time: Option<String>,

    pub delivery_address: Option<String>,

    #[validate(range(min = 0, message = "Delivery fee cannot be negative"))]
    pub delivery_fee: Option<i64>,

    pub notes: Option<String>,

    #[schema(example = "midtrans")]
    pub payment_method: Option<String>,

    /// `pending` (default) or `processing_payment`.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusRequest {
    /// One of `pending`, `picked_up`, `cancelled`, `expired`.
    #[schema(example = "picked_up")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDeliveryStatusRequest {
    /// One of `pending`, `on_delivery`, `delivered`, `failed`.
    #[schema(example = "on_delivery")]
    pub delivery_status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct OrderStatsQuery {
    pub seller_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderRecord {
    pub buyer_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub delivery_method: String,
    pub pickup_time: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_fee: i64,
    pub status: String,
    pub notes: Option<String>,
    pub payment_method: Option<String>,
}
