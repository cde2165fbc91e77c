use crate::{abstract_trait::HashingTrait, errors::ServiceError};
use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash, verify};

#[derive(Debug, Clone)]
pub struct Hashing {
    cost: u32,
}

impl Hashing {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for Hashing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HashingTrait for Hashing {
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let hashed = hash(password, self.cost).map_err(ServiceError::Bcrypt)?;
        Ok(hashed)
    }

    async fn compare_password(
        &self,
        hashed_password: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        let is_valid = verify(password, hashed_password).map_err(ServiceError::Bcrypt)?;

        if is_valid {
            Ok(())
        } else {
            Err(ServiceError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashed_password_verifies() {
        let hashing = Hashing::with_cost(4);
        let hashed = hashing.hash_password("s3cret-pass").await.unwrap();

        assert_ne!(hashed, "s3cret-pass");
        assert!(hashing.compare_password(&hashed, "s3cret-pass").await.is_ok());
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let hashing = Hashing::with_cost(4);
        let hashed = hashing.hash_password("s3cret-pass").await.unwrap();

        let result = hashing.compare_password(&hashed, "other").await;
        assert!(matches!(result, Err(ServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn malformed_hash_is_a_bcrypt_error() {
        let hashing = Hashing::with_cost(4);
        let result = hashing.compare_password("not-a-hash", "whatever").await;
        assert!(matches!(result, Err(ServiceError::Bcrypt(_))));
    }
}
