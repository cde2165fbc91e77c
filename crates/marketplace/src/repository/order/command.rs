use crate::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    domain::requests::order::CreateOrderRecord,
    model::{
        order::{DeliveryStatus, Order as OrderModel, OrderStatus},
        order_detail::{OrderDetail as OrderDetailModel, line_total},
        product::{ProductStock, remaining_stock},
    },
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, Transaction};
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn lock_order(
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> Result<OrderModel, RepositoryError> {
        sqlx::query_as::<_, OrderModel>("SELECT * FROM orders WHERE order_id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(RepositoryError::from)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Gives the order's quantity back to its product. Returns how many units
    /// were restored; zero when the product no longer exists.
    async fn restore_stock(
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderModel,
    ) -> Result<i32, RepositoryError> {
        let Some(product_id) = order.product_id else {
            warn!(
                "⚠️ Order {} has no product left, nothing to restore",
                order.order_id
            );
            return Ok(0);
        };

        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock + $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .bind(order.quantity)
        .execute(&mut **tx)
        .await
        .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Ok(0);
        }

        info!(
            "📦 Restored {} unit(s) to product {} from order {}",
            order.quantity, product_id, order.order_id
        );
        Ok(order.quantity)
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecord,
    ) -> Result<(OrderModel, OrderDetailModel), RepositoryError> {
        info!(
            "🛒 Creating order: buyer {} wants {} x product {}",
            req.buyer_id, req.quantity, req.product_id
        );

        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        let product = sqlx::query_as::<_, ProductStock>(
            r#"
            SELECT p.product_id, p.name, p.image_url, p.price, p.discount_price,
                   p.stock, p.seller_id, u.name AS seller_name
            FROM products p
            LEFT JOIN users u ON u.user_id = p.seller_id
            WHERE p.product_id = $1
            FOR UPDATE OF p
            "#,
        )
        .bind(req.product_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to lock product {}: {:?}", req.product_id, e);
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        let left = remaining_stock(product.stock, req.quantity).ok_or(
            RepositoryError::InsufficientStock {
                available: product.stock,
                requested: req.quantity,
            },
        )?;

        sqlx::query(
            r#"
            UPDATE products
            SET stock = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE product_id = $1
            "#,
        )
        .bind(product.product_id)
        .bind(left)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to reserve stock of product {}: {:?}", product.product_id, e);
            RepositoryError::from(e)
        })?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (
                buyer_id, product_id, seller_id, quantity, delivery_method,
                pickup_time, delivery_address, delivery_fee, status, notes,
                payment_method, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(req.buyer_id)
        .bind(product.product_id)
        .bind(product.seller_id)
        .bind(req.quantity)
        .bind(&req.delivery_method)
        .bind(&req.pickup_time)
        .bind(&req.delivery_address)
        .bind(req.delivery_fee)
        .bind(&req.status)
        .bind(&req.notes)
        .bind(&req.payment_method)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert order for buyer {}: {:?}", req.buyer_id, e);
            RepositoryError::from(e)
        })?;

        let detail = sqlx::query_as::<_, OrderDetailModel>(
            r#"
            INSERT INTO order_details (
                order_id, product_id, product_name, product_image, quantity,
                unit_price, discount_price, total_price, seller_id, seller_name,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(order.order_id)
        .bind(product.product_id)
        .bind(&product.name)
        .bind(&product.image_url)
        .bind(req.quantity)
        .bind(product.price)
        .bind(product.discount_price)
        .bind(line_total(req.quantity, product.price, product.discount_price))
        .bind(product.seller_id)
        .bind(&product.seller_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert detail for order {}: {:?}", order.order_id, e);
            RepositoryError::from(e)
        })?;

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit order transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!(
            "✅ Created order ID {} ({} unit(s) reserved, {} left)",
            order.order_id, req.quantity, left
        );
        Ok((order, detail))
    }

    async fn update_status(
        &self,
        id: i32,
        status: OrderStatus,
    ) -> Result<OrderModel, RepositoryError> {
        info!("🔄 Setting status of order {} to {}", id, status);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let updated = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET status = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $1 AND status <> 'cancelled'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update status of order {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        if let Some(order) = updated {
            return Ok(order);
        }

        let exists: Option<i32> = sqlx::query_scalar("SELECT order_id FROM orders WHERE order_id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        match exists {
            Some(_) => Err(RepositoryError::InvalidState(
                "Order status cannot be changed once cancelled".to_string(),
            )),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn update_delivery_status(
        &self,
        id: i32,
        status: DeliveryStatus,
    ) -> Result<OrderModel, RepositoryError> {
        info!("🚚 Setting delivery status of order {} to {}", id, status);

        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET delivery_status = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to update delivery status of order {}: {:?}", id, e);
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        if status.is_tracked() {
            sqlx::query(
                "INSERT INTO order_tracking (order_id, status, time) VALUES ($1, $2, CURRENT_TIMESTAMP)",
            )
            .bind(id)
            .bind(status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to append tracking for order {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(order)
    }

    async fn cancel_order(&self, id: i32) -> Result<(OrderModel, i32), RepositoryError> {
        info!("🚫 Cancelling order: {}", id);

        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = Self::lock_order(&mut tx, id).await?;

        let cancellable = order.status().map(|s| s.can_cancel()).unwrap_or(false);
        if !cancellable {
            return Err(RepositoryError::InvalidState(
                "Order cannot be cancelled".to_string(),
            ));
        }

        let restored = Self::restore_stock(&mut tx, &order).await?;

        let cancelled = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET status = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(OrderStatus::Cancelled.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to cancel order {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit cancellation of order {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Cancelled order {} ({} unit(s) restored)", id, restored);
        Ok((cancelled, restored))
    }

    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting order: {}", id);

        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = Self::lock_order(&mut tx, id).await?;

        if order.status().map(|s| s.can_cancel()).unwrap_or(false) {
            Self::restore_stock(&mut tx, &order).await?;
        }

        sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete order {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(())
    }
}
