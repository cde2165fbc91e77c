use crate::model::order_detail::{OrderDetail, line_total};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct FindAllOrderDetails {
    pub order_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderDetailRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,

    #[validate(range(min = 0, message = "Unit price cannot be negative"))]
    pub unit_price: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOrderDetailRecord {
    pub order_detail_id: i32,
    pub quantity: i32,
    pub unit_price: i64,
    pub total_price: i64,
}

impl UpdateOrderDetailRequest {
    /// Applies the edit and recomputes the line total from the stored discount.
    pub fn apply_to(&self, existing: &OrderDetail) -> UpdateOrderDetailRecord {
        let quantity = self.quantity.unwrap_or(existing.quantity);
        let unit_price = self.unit_price.unwrap_or(existing.unit_price);

        UpdateOrderDetailRecord {
            order_detail_id: existing.order_detail_id,
            quantity,
            unit_price,
            total_price: line_total(quantity, unit_price, existing.discount_price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn edit_recomputes_total() {
        let req = UpdateOrderDetailRequest {
            quantity: Some(4),
            unit_price: None,
        };
        assert_eq!(req.apply_to(&detail(None)).total_price, 40_000);
        assert_eq!(req.apply_to(&detail(Some(7_000))).total_price, 28_000);

        let req = UpdateOrderDetailRequest {
            quantity: None,
            unit_price: Some(12_000),
        };
        let record = req.apply_to(&detail(Some(0)));
        assert_eq!(record.quantity, 2);
        assert_eq!(record.total_price, 24_000);
    }
}
