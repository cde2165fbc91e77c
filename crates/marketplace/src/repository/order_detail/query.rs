use crate::{
    abstract_trait::order_detail::repository::OrderDetailQueryRepositoryTrait,
    model::order_detail::OrderDetail as OrderDetailModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderDetailQueryRepository {
    db: ConnectionPool,
}

impl OrderDetailQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderDetailQueryRepositoryTrait for OrderDetailQueryRepository {
    async fn find_all(
        &self,
        order_id: Option<i32>,
    ) -> Result<Vec<OrderDetailModel>, RepositoryError> {
        info!("🔍 Fetching order details (order: {:?})", order_id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let details = sqlx::query_as::<_, OrderDetailModel>(
            r#"
            SELECT *
            FROM order_details
            WHERE ($1::INTEGER IS NULL OR order_id = $1)
            ORDER BY created_at DESC, order_detail_id DESC
            "#,
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order details: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(details)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderDetailModel>, RepositoryError> {
        info!("🆔 Fetching order detail by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let detail = sqlx::query_as::<_, OrderDetailModel>(
            "SELECT * FROM order_details WHERE order_detail_id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order detail {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        Ok(detail)
    }

    async fn find_by_order_ids(
        &self,
        order_ids: &[i32],
    ) -> Result<Vec<OrderDetailModel>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let details = sqlx::query_as::<_, OrderDetailModel>(
            r#"
            SELECT *
            FROM order_details
            WHERE order_id = ANY($1)
            ORDER BY order_detail_id ASC
            "#,
        )
        .bind(order_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch details for orders {:?}: {:?}", order_ids, e);
            RepositoryError::from(e)
        })?;

        Ok(details)
    }
}
