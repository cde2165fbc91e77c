use crate::{
    abstract_trait::order_detail::repository::OrderDetailCommandRepositoryTrait,
    domain::requests::order_detail::UpdateOrderDetailRecord,
    model::order_detail::OrderDetail as OrderDetailModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderDetailCommandRepository {
    db: ConnectionPool,
}

impl OrderDetailCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderDetailCommandRepositoryTrait for OrderDetailCommandRepository {
    async fn update_detail(
        &self,
        req: &UpdateOrderDetailRecord,
    ) -> Result<OrderDetailModel, RepositoryError> {
        info!(
            "🔄 Updating order detail {}: qty {} @ {} = {}",
            req.order_detail_id, req.quantity, req.unit_price, req.total_price
        );

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let detail = sqlx::query_as::<_, OrderDetailModel>(
            r#"
            UPDATE order_details
            SET quantity    = $2,
                unit_price  = $3,
                total_price = $4
            WHERE order_detail_id = $1
            RETURNING *
            "#,
        )
        .bind(req.order_detail_id)
        .bind(req.quantity)
        .bind(req.unit_price)
        .bind(req.total_price)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update order detail {}: {:?}", req.order_detail_id, e);
            RepositoryError::from(e)
        })?;

        Ok(detail)
    }

    async fn delete_detail(&self, id: i32) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting order detail: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM order_details WHERE order_detail_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete order detail {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
