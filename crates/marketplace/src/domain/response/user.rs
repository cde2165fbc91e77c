use crate::model::user::User;
use serde::{Deserialize, Serialize};
use shared::utils::format_datetime;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreResponse {
    pub name: Option<String>,
    pub address: Option<String>,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub store: Option<StoreResponse>,
    pub profile_image: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let store = value.has_store().then(|| StoreResponse {
            name: value.store_name.clone(),
            address: value.store_address.clone(),
            category: value.store_category.clone(),
            phone: value.store_phone.clone(),
            status: value.store_status.clone(),
        });

        UserResponse {
            id: value.user_id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            address: value.address,
            role: value.role,
            store,
            profile_image: value.profile_image,
            category: value.category,
            created_at: value.created_at.as_ref().map(format_datetime),
            updated_at: value.updated_at.as_ref().map(format_datetime),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
}
