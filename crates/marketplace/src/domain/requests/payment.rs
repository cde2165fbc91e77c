use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionRequest {
    /// Merchant-side order reference; must be unique per transaction.
    #[validate(length(min = 1, max = 50, message = "Order id must be 1-50 characters"))]
    #[schema(example = "ORDER-12-1719730000")]
    pub order_id: String,

    #[validate(range(min = 1, message = "Gross amount must be positive"))]
    #[schema(example = 24000)]
    pub gross_amount: i64,

    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub customer_email: String,
}
