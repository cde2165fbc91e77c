use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: i64,
    pub discount_price: Option<i64>,
    pub original_price: Option<i64>,
    pub stock: i32,
    pub expired_date: NaiveDateTime,
    pub pickup_location: Option<String>,
    pub seller_id: i32,
    pub is_available: bool,
    pub category: Option<String>,
    pub food_status: Option<String>,
    pub storage: Option<String>,
    pub suggestion: Option<String>,
    pub checklist: Vec<String>,
    pub halal: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Product {
    /// Price a buyer pays per unit: the discount when one is set, otherwise the list price.
    pub fn effective_price(&self) -> i64 {
        effective_unit_price(self.price, self.discount_price)
    }

    /// Listed, in stock and not past its expiry date.
    pub fn is_purchasable(&self, now: NaiveDateTime) -> bool {
        self.is_available && self.stock > 0 && self.expired_date > now
    }
}

/// Stock left after taking `requested` units, or `None` when that would go negative.
pub fn remaining_stock(available: i32, requested: i32) -> Option<i32> {
    if requested < 1 {
        return None;
    }

    available.checked_sub(requested).filter(|left| *left >= 0)
}

pub fn effective_unit_price(unit_price: i64, discount_price: Option<i64>) -> i64 {
    match discount_price {
        Some(discount) if discount > 0 => discount,
        _ => unit_price,
    }
}

/// Row used inside the order transaction: the locked product plus its seller's name.
#[derive(Debug, Clone, FromRow)]
pub struct ProductStock {
    pub product_id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub price: i64,
    pub discount_price: Option<i64>,
    pub stock: i32,
    pub seller_id: i32,
    pub seller_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub review_id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub user_name: Option<String>,
    pub rating: i32,
    pub comment: String,
    pub created_at: Option<NaiveDateTime>,
}

#[cfg(test)]
pub(crate) fn sample_product(product_id: i32, seller_id: i32, stock: i32) -> Product {
    use chrono::{Duration, Utc};

    Product {
        product_id,
        name: format!("Nasi Box #{product_id}"),
        description: Some("Surplus lunch box".into()),
        image_url: None,
        price: 25_000,
        discount_price: Some(12_000),
        original_price: Some(25_000),
        stock,
        expired_date: (Utc::now() + Duration::days(1)).naive_utc(),
        pickup_location: Some("Bandung".into()),
        seller_id,
        is_available: true,
        category: Some("nasi".into()),
        food_status: None,
        storage: None,
        suggestion: None,
        checklist: vec![],
        halal: Some("halal".into()),
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn reserving_never_goes_negative() {
        assert_eq!(remaining_stock(5, 2), Some(3));
        assert_eq!(remaining_stock(5, 5), Some(0));
        assert_eq!(remaining_stock(5, 6), None);
        assert_eq!(remaining_stock(0, 1), None);
    }

    #[test]
    fn non_positive_quantities_are_rejected() {
        assert_eq!(remaining_stock(5, 0), None);
        assert_eq!(remaining_stock(5, -3), None);
    }

    #[test]
    fn zero_discount_falls_back_to_unit_price() {
        assert_eq!(effective_unit_price(10_000, None), 10_000);
        assert_eq!(effective_unit_price(10_000, Some(0)), 10_000);
        assert_eq!(effective_unit_price(10_000, Some(7_500)), 7_500);
    }

    #[test]
    fn expired_or_empty_products_are_not_purchasable() {
        let now = Utc::now().naive_utc();

        let fresh = sample_product(1, 1, 3);
        assert!(fresh.is_purchasable(now));

        let mut sold_out = sample_product(2, 1, 0);
        assert!(!sold_out.is_purchasable(now));
        sold_out.stock = 1;
        sold_out.is_available = false;
        assert!(!sold_out.is_purchasable(now));

        let mut stale = sample_product(3, 1, 3);
        stale.expired_date = now - Duration::hours(1);
        assert!(!stale.is_purchasable(now));
    }
}
