use crate::{
    domain::requests::{default_page, default_page_size},
    model::user::User,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllUsers {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: i32,

    /// Exact (case-insensitive) email match.
    pub email: Option<String>,

    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindSellers {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: i32,

    /// Matches seller name or store name.
    pub search: Option<String>,

    /// Matches the seller address.
    pub location: Option<String>,

    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct StoreRequest {
    #[validate(length(max = 150, message = "Store name is too long"))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub category: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    #[schema(example = "Siti Rahma")]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "siti@example.com")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub phone: Option<String>,
    pub address: Option<String>,

    /// `buyer` (default) or `seller`.
    #[schema(example = "seller")]
    pub role: Option<String>,

    #[validate(nested)]
    pub store: Option<StoreRequest>,

    pub profile_image: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,

    /// Fields given here are merged into the stored store; omitted ones are kept.
    #[validate(nested)]
    pub store: Option<StoreRequest>,

    pub profile_image: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStoreStatusRequest {
    /// `pending`, `approved` or `rejected`.
    #[schema(example = "approved")]
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct CreateUserRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub store_name: Option<String>,
    pub store_address: Option<String>,
    pub store_category: Option<String>,
    pub store_phone: Option<String>,
    pub profile_image: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateUserRecord {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub store_name: Option<String>,
    pub store_address: Option<String>,
    pub store_category: Option<String>,
    pub store_phone: Option<String>,
    pub profile_image: Option<String>,
    pub category: Option<String>,
}

impl UpdateUserRequest {
    /// Overlays the request on the stored user. `password_hash` replaces the
    /// stored hash when the caller changed the password.
    pub fn merge_into(&self, existing: &User, password_hash: Option<String>) -> UpdateUserRecord {
        let store = self.store.clone().unwrap_or_default();

        UpdateUserRecord {
            user_id: existing.user_id,
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            email: self.email.clone().unwrap_or_else(|| existing.email.clone()),
            password: password_hash.unwrap_or_else(|| existing.password.clone()),
            phone: self.phone.clone().or_else(|| existing.phone.clone()),
            address: self.address.clone().or_else(|| existing.address.clone()),
            role: self.role.clone().unwrap_or_else(|| existing.role.clone()),
            store_name: store.name.or_else(|| existing.store_name.clone()),
            store_address: store.address.or_else(|| existing.store_address.clone()),
            store_category: store.category.or_else(|| existing.store_category.clone()),
            store_phone: store.phone.or_else(|| existing.store_phone.clone()),
            profile_image: self
                .profile_image
                .clone()
                .or_else(|| existing.profile_image.clone()),
            category: self.category.clone().or_else(|| existing.category.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::{StoreStatus, UserRole, sample_user};

    #[test]
    fn store_fields_merge_instead_of_replacing() {
        let mut existing = sample_user(3, UserRole::Seller, StoreStatus::Approved);
        existing.store_name = Some("Dapur Sisa".into());
        existing.store_phone = Some("0812".into());

        let req = UpdateUserRequest {
            store: Some(StoreRequest {
                address: Some("Jl. Braga 5".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let record = req.merge_into(&existing, None);
        assert_eq!(record.store_name.as_deref(), Some("Dapur Sisa"));
        assert_eq!(record.store_phone.as_deref(), Some("0812"));
        assert_eq!(record.store_address.as_deref(), Some("Jl. Braga 5"));
        assert_eq!(record.name, existing.name);
    }

    #[test]
    fn new_password_hash_replaces_stored_one() {
        let mut existing = sample_user(3, UserRole::Buyer, StoreStatus::Pending);
        existing.password = "old-hash".into();

        let req = UpdateUserRequest::default();
        assert_eq!(req.merge_into(&existing, None).password, "old-hash");
        assert_eq!(
            req.merge_into(&existing, Some("new-hash".into())).password,
            "new-hash"
        );
    }

    #[test]
    fn create_request_validation() {
        let req = CreateUserRequest {
            name: String::new(),
            email: "not-an-email".into(),
            password: "123".into(),
            phone: None,
            address: None,
            role: None,
            store: None,
            profile_image: None,
            category: None,
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}
