use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{CreateProductRecord, CreateReviewRecord, UpdateProductRecord},
    model::product::{Product as ProductModel, Review as ReviewModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRecord,
    ) -> Result<ProductModel, RepositoryError> {
        info!("🆕 Creating product '{}' for seller {}", req.name, req.seller_id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (
                name, description, image_url, price, discount_price, original_price,
                stock, expired_date, pickup_location, seller_id, is_available,
                category, food_status, storage, suggestion, checklist, halal,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.image_url)
        .bind(req.price)
        .bind(req.discount_price)
        .bind(req.original_price)
        .bind(req.stock)
        .bind(req.expired_date)
        .bind(&req.pickup_location)
        .bind(req.seller_id)
        .bind(req.is_available)
        .bind(&req.category)
        .bind(&req.food_status)
        .bind(&req.storage)
        .bind(&req.suggestion)
        .bind(&req.checklist)
        .bind(&req.halal)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create product '{}': {:?}", req.name, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Created product ID {}", product.product_id);
        Ok(product)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRecord,
    ) -> Result<ProductModel, RepositoryError> {
        info!("🔄 Updating product ID: {}", req.product_id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name            = COALESCE($2, name),
                description     = COALESCE($3, description),
                image_url       = COALESCE($4, image_url),
                price           = COALESCE($5, price),
                discount_price  = CASE WHEN $6 THEN $7 ELSE discount_price END,
                original_price  = COALESCE($8, original_price),
                stock           = COALESCE($9, stock),
                expired_date    = COALESCE($10, expired_date),
                pickup_location = COALESCE($11, pickup_location),
                is_available    = COALESCE($12, is_available),
                category        = COALESCE($13, category),
                food_status     = COALESCE($14, food_status),
                storage         = COALESCE($15, storage),
                suggestion      = COALESCE($16, suggestion),
                checklist       = COALESCE($17, checklist),
                halal           = COALESCE($18, halal),
                updated_at      = CURRENT_TIMESTAMP
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(req.product_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.image_url)
        .bind(req.price)
        .bind(req.discount_price.is_some())
        .bind(req.discount_price.flatten())
        .bind(req.original_price)
        .bind(req.stock)
        .bind(req.expired_date)
        .bind(&req.pickup_location)
        .bind(req.is_available)
        .bind(&req.category)
        .bind(&req.food_status)
        .bind(&req.storage)
        .bind(&req.suggestion)
        .bind(&req.checklist)
        .bind(&req.halal)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update product {}: {:?}", req.product_id, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Updated product ID {}", product.product_id);
        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting product: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn create_review(&self, req: &CreateReviewRecord) -> Result<ReviewModel, RepositoryError> {
        info!(
            "⭐ Adding {}-star review to product {} by user {}",
            req.rating, req.product_id, req.user_id
        );

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let review = sqlx::query_as::<_, ReviewModel>(
            r#"
            WITH inserted AS (
                INSERT INTO product_reviews (product_id, user_id, rating, comment, created_at)
                VALUES ($1, $2, $3, $4, CURRENT_TIMESTAMP)
                RETURNING *
            )
            SELECT i.review_id, i.product_id, i.user_id, u.name AS user_name,
                   i.rating, i.comment, i.created_at
            FROM inserted i
            LEFT JOIN users u ON u.user_id = i.user_id
            "#,
        )
        .bind(req.product_id)
        .bind(req.user_id)
        .bind(req.rating)
        .bind(&req.comment)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to add review to product {}: {:?}", req.product_id, e);
            RepositoryError::from(e)
        })?;

        Ok(review)
    }
}
