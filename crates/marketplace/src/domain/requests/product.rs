use crate::{
    domain::requests::{default_page, default_page_size},
    model::product::Product,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use shared::utils::parse_datetime;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: i32,

    /// Case-insensitive match on the product name.
    pub search: Option<String>,

    #[validate(range(min = 0, message = "min_price cannot be negative"))]
    pub min_price: Option<i64>,

    #[validate(range(min = 0, message = "max_price cannot be negative"))]
    pub max_price: Option<i64>,

    /// Case-insensitive match on the pickup location.
    pub location: Option<String>,

    pub category: Option<String>,

    pub seller_id: Option<i32>,

    /// When true, only listed, in-stock, unexpired products are returned.
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    #[schema(example = "Roti Sobek Coklat")]
    pub name: String,

    pub description: Option<String>,
    pub image_url: Option<String>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 15000)]
    pub price: i64,

    #[validate(range(min = 0, message = "Discount price cannot be negative"))]
    #[schema(example = 7000)]
    pub discount_price: Option<i64>,

    #[validate(range(min = 0, message = "Original price cannot be negative"))]
    pub original_price: Option<i64>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 5)]
    pub stock: Option<i32>,

    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    #[validate(length(min = 1, message = "Expired date is required"))]
    #[schema(example = "2025-06-30T20:00:00+07:00")]
    pub expired_date: String,

    pub pickup_location: Option<String>,

    /// Defaults to the authenticated user.
    pub seller_id: Option<i32>,

    pub is_available: Option<bool>,
    pub category: Option<String>,
    pub food_status: Option<String>,
    pub storage: Option<String>,
    pub suggestion: Option<String>,
    pub checklist: Option<Vec<String>>,
    pub halal: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name cannot be empty"))]
    pub name: Option<String>,

    pub description: Option<String>,
    pub image_url: Option<String>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i64>,

    /// `null` or `0` removes the discount; leaving the field out keeps it.
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<i64>)]
    pub discount_price: Option<Option<i64>>,

    #[validate(range(min = 0, message = "Original price cannot be negative"))]
    pub original_price: Option<i64>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,

    pub expired_date: Option<String>,
    pub pickup_location: Option<String>,
    pub is_available: Option<bool>,
    pub category: Option<String>,
    pub food_status: Option<String>,
    pub storage: Option<String>,
    pub suggestion: Option<String>,
    pub checklist: Option<Vec<String>>,
    pub halal: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(
        required(message = "Rating is required"),
        range(min = 1, max = 5, message = "Rating must be between 1 and 5")
    )]
    #[schema(example = 5)]
    pub rating: Option<i32>,

    #[validate(
        required(message = "Comment is required"),
        length(min = 1, message = "Comment is required")
    )]
    #[schema(example = "Masih hangat, enak!")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateProductRecord {
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
}

/// Column patch: `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductRecord {
    pub product_id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<i64>,
    /// `Some(None)` clears the discount.
    pub discount_price: Option<Option<i64>>,
    pub original_price: Option<i64>,
    pub stock: Option<i32>,
    pub expired_date: Option<NaiveDateTime>,
    pub pickup_location: Option<String>,
    pub is_available: Option<bool>,
    pub category: Option<String>,
    pub food_status: Option<String>,
    pub storage: Option<String>,
    pub suggestion: Option<String>,
    pub checklist: Option<Vec<String>>,
    pub halal: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateReviewRecord {
    pub product_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: String,
}

/// A discount above the list price is almost certainly a typo.
pub fn check_pricing(price: i64, discount_price: Option<i64>) -> Result<(), String> {
    match discount_price {
        Some(discount) if discount > price => Err(format!(
            "Discount price ({discount}) cannot exceed price ({price})"
        )),
        _ => Ok(()),
    }
}

impl CreateProductRequest {
    pub fn into_record(self, seller_id: i32) -> Result<CreateProductRecord, String> {
        let expired_date = parse_datetime(&self.expired_date)
            .ok_or_else(|| format!("Invalid expired_date: {}", self.expired_date))?;

        check_pricing(self.price, self.discount_price)?;

        Ok(CreateProductRecord {
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            price: self.price,
            discount_price: self.discount_price,
            original_price: self.original_price,
            stock: self.stock.unwrap_or(1),
            expired_date,
            pickup_location: self.pickup_location,
            seller_id,
            is_available: self.is_available.unwrap_or(true),
            category: self.category,
            food_status: self.food_status,
            storage: self.storage,
            suggestion: self.suggestion,
            checklist: self.checklist.unwrap_or_default(),
            halal: self.halal,
        })
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing field (`None`).
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

impl UpdateProductRequest {
    /// Only supplied fields end up in the patch. `existing` is consulted for
    /// the price check and nothing else, so concurrent stock movements are
    /// never overwritten.
    pub fn into_patch(&self, existing: &Product) -> Result<UpdateProductRecord, String> {
        let expired_date = self
            .expired_date
            .as_deref()
            .map(|raw| parse_datetime(raw).ok_or_else(|| format!("Invalid expired_date: {raw}")))
            .transpose()?;

        if let Some(Some(discount)) = self.discount_price {
            if discount < 0 {
                return Err("Discount price cannot be negative".into());
            }
        }
        let discount_price = self
            .discount_price
            .map(|discount| discount.filter(|value| *value != 0));

        check_pricing(
            self.price.unwrap_or(existing.price),
            discount_price.unwrap_or(existing.discount_price),
        )?;

        Ok(UpdateProductRecord {
            product_id: existing.product_id,
            name: self.name.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            price: self.price,
            discount_price,
            original_price: self.original_price,
            stock: self.stock,
            expired_date,
            pickup_location: self.pickup_location.clone(),
            is_available: self.is_available,
            category: self.category.clone(),
            food_status: self.food_status.clone(),
            storage: self.storage.clone(),
            suggestion: self.suggestion.clone(),
            checklist: self.checklist.clone(),
            halal: self.halal.clone(),
        })
    }
}
