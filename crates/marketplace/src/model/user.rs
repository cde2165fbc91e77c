use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub store_name: Option<String>,
    pub store_address: Option<String>,
    pub store_category: Option<String>,
    pub store_phone: Option<String>,
    pub store_status: String,
    pub profile_image: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    pub fn role(&self) -> UserRole {
        self.role.parse().unwrap_or_default()
    }

    pub fn store_status(&self) -> StoreStatus {
        self.store_status.parse().unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == UserRole::Admin
    }

    /// Admins always may list products; sellers only once their store is approved.
    pub fn can_sell(&self) -> bool {
        match self.role() {
            UserRole::Admin => true,
            UserRole::Seller => self.store_status() == StoreStatus::Approved,
            UserRole::Buyer => false,
        }
    }

    pub fn has_store(&self) -> bool {
        self.store_name.is_some()
            || self.store_address.is_some()
            || self.store_category.is_some()
            || self.store_phone.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Buyer,
    Seller,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Self::Buyer),
            "seller" => Ok(Self::Seller),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid store status: {s}")),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_user(user_id: i32, role: UserRole, store_status: StoreStatus) -> User {
    User {
        user_id,
        name: format!("user-{user_id}"),
        email: format!("user{user_id}@example.com"),
        password: String::new(),
        phone: None,
        address: Some("Jl. Merdeka 1, Bandung".into()),
        role: role.to_string(),
        store_name: None,
        store_address: None,
        store_category: None,
        store_phone: None,
        store_status: store_status.to_string(),
        profile_image: None,
        category: None,
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_approved_sellers_and_admins_can_sell() {
        assert!(sample_user(1, UserRole::Seller, StoreStatus::Approved).can_sell());
        assert!(!sample_user(2, UserRole::Seller, StoreStatus::Pending).can_sell());
        assert!(!sample_user(3, UserRole::Seller, StoreStatus::Rejected).can_sell());
        assert!(sample_user(4, UserRole::Admin, StoreStatus::Pending).can_sell());
        assert!(!sample_user(5, UserRole::Buyer, StoreStatus::Approved).can_sell());
    }

    #[test]
    fn unknown_stored_role_falls_back_to_buyer() {
        let mut user = sample_user(1, UserRole::Admin, StoreStatus::Pending);
        user.role = "superuser".into();
        assert_eq!(user.role(), UserRole::Buyer);
        assert!(!user.is_admin());
    }

    #[test]
    fn role_round_trips_through_text() {
        for role in [UserRole::Buyer, UserRole::Seller, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
        }
        assert!("penjual".parse::<UserRole>().is_err());
    }

    #[test]
    fn password_is_never_serialized() {
        let mut user = sample_user(9, UserRole::Buyer, StoreStatus::Pending);
        user.password = "$2b$04$hash".into();

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }
}
