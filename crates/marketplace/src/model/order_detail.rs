use crate::model::product::effective_unit_price;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderDetail {
    pub order_detail_id: i32,
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
    pub created_at: Option<NaiveDateTime>,
}

/// `quantity × (discount or unit price)`.
pub fn line_total(quantity: i32, unit_price: i64, discount_price: Option<i64>) -> i64 {
    i64::from(quantity) * effective_unit_price(unit_price, discount_price)
}
