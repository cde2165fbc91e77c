use crate::{
    abstract_trait::user::repository::UserCommandRepositoryTrait,
    domain::requests::user::{CreateUserRecord, UpdateUserRecord},
    model::user::{StoreStatus, User as UserModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<UserModel, RepositoryError> {
        info!("🆕 Creating user with email: {}", req.email);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (
                name, email, password, phone, address, role,
                store_name, store_address, store_category, store_phone,
                profile_image, category, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.password)
        .bind(&req.phone)
        .bind(&req.address)
        .bind(&req.role)
        .bind(&req.store_name)
        .bind(&req.store_address)
        .bind(&req.store_category)
        .bind(&req.store_phone)
        .bind(&req.profile_image)
        .bind(&req.category)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create user {}: {:?}", req.email, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Created user ID {} ({})", user.user_id, user.role);
        Ok(user)
    }

    async fn update_user(&self, req: &UpdateUserRecord) -> Result<UserModel, RepositoryError> {
        info!("🔄 Updating user ID: {}", req.user_id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users
            SET name           = $2,
                email          = $3,
                password       = $4,
                phone          = $5,
                address        = $6,
                role           = $7,
                store_name     = $8,
                store_address  = $9,
                store_category = $10,
                store_phone    = $11,
                profile_image  = $12,
                category       = $13,
                updated_at     = CURRENT_TIMESTAMP
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(req.user_id)
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.password)
        .bind(&req.phone)
        .bind(&req.address)
        .bind(&req.role)
        .bind(&req.store_name)
        .bind(&req.store_address)
        .bind(&req.store_category)
        .bind(&req.store_phone)
        .bind(&req.profile_image)
        .bind(&req.category)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update user {}: {:?}", req.user_id, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Updated user ID {}", user.user_id);
        Ok(user)
    }

    async fn update_store_status(
        &self,
        id: i32,
        status: StoreStatus,
    ) -> Result<UserModel, RepositoryError> {
        info!("🏪 Setting store status of user {} to {}", id, status);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users
            SET store_status = $2,
                updated_at   = CURRENT_TIMESTAMP
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update store status of user {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting user: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete user {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
