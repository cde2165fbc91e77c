use crate::model::{
    product::{Product, Review},
    user::User,
};
use serde::{Deserialize, Serialize};
use shared::utils::format_datetime;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: i64,
    pub discount_price: Option<i64>,
    pub original_price: Option<i64>,
    pub stock: i32,
    pub expired_date: String,
    pub pickup_location: Option<String>,
    pub seller_id: i32,
    pub is_available: bool,
    pub category: Option<String>,
    pub food_status: Option<String>,
    pub storage: Option<String>,
    pub suggestion: Option<String>,
    pub checklist: Vec<String>,
    pub halal: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            id: value.product_id,
            name: value.name,
            description: value.description,
            image_url: value.image_url,
            price: value.price,
            discount_price: value.discount_price,
            original_price: value.original_price,
            stock: value.stock,
            expired_date: format_datetime(&value.expired_date),
            pickup_location: value.pickup_location,
            seller_id: value.seller_id,
            is_available: value.is_available,
            category: value.category,
            food_status: value.food_status,
            storage: value.storage,
            suggestion: value.suggestion,
            checklist: value.checklist,
            halal: value.halal,
            created_at: value.created_at.as_ref().map(format_datetime),
            updated_at: value.updated_at.as_ref().map(format_datetime),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i32,
    pub user_id: i32,
    pub user_name: Option<String>,
    pub rating: i32,
    pub comment: String,
    pub date: Option<String>,
}

impl From<Review> for ReviewResponse {
    fn from(value: Review) -> Self {
        ReviewResponse {
            id: value.review_id,
            user_id: value.user_id,
            user_name: value.user_name,
            rating: value.rating,
            comment: value.comment,
            date: value.created_at.as_ref().map(format_datetime),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerSummaryResponse {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub store_name: Option<String>,
    pub store_address: Option<String>,
    pub store_status: String,
}

impl From<User> for SellerSummaryResponse {
    fn from(value: User) -> Self {
        SellerSummaryResponse {
            id: value.user_id,
            name: value.name,
            phone: value.phone,
            store_name: value.store_name,
            store_address: value.store_address,
            store_status: value.store_status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub seller: Option<SellerSummaryResponse>,
    pub reviews: Vec<ReviewResponse>,
    pub average_rating: Option<f64>,
}

impl ProductDetailResponse {
    pub fn new(product: Product, seller: Option<User>, reviews: Vec<Review>) -> Self {
        let average_rating = (!reviews.is_empty()).then(|| {
            let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
            (sum as f64 / reviews.len() as f64 * 10.0).round() / 10.0
        });

        ProductDetailResponse {
            product: product.into(),
            seller: seller.map(Into::into),
            reviews: reviews.into_iter().map(Into::into).collect(),
            average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::product::sample_product;

    fn review(review_id: i32, rating: i32) -> Review {
        Review {
            review_id,
            product_id: 1,
            user_id: 2,
            user_name: Some("Budi".into()),
            rating,
            comment: "ok".into(),
            created_at: None,
        }
    }

    #[test]
    fn detail_flattens_product_fields() {
        let detail = ProductDetailResponse::new(sample_product(1, 2, 3), None, vec![]);
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["stock"], 3);
        assert!(json["seller"].is_null());
        assert!(json["average_rating"].is_null());
    }

    #[test]
    fn average_rating_is_rounded_to_one_decimal() {
        let detail = ProductDetailResponse::new(
            sample_product(1, 2, 3),
            None,
            vec![review(1, 5), review(2, 4), review(3, 4)],
        );

        assert_eq!(detail.average_rating, Some(4.3));
        assert_eq!(detail.reviews.len(), 3);
    }
}
