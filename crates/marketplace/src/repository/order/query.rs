use crate::{
    abstract_trait::order::repository::OrderQueryRepositoryTrait,
    domain::requests::order::FindAllOrders,
    model::order::{Order as OrderModel, OrderStatusSummary, OrderTracking},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, domain::responses::Pagination, errors::RepositoryError};
use sqlx::FromRow;
use tracing::{error, info};

#[derive(FromRow)]
struct CountedOrder {
    #[sqlx(flatten)]
    order: OrderModel,
    total_count: i64,
}

const ORDER_FILTERS: &str = r#"
    WHERE ($1::INTEGER IS NULL OR buyer_id = $1)
      AND ($2::INTEGER IS NULL OR seller_id = $2)
      AND ($3::TEXT IS NULL OR status = $3)
      AND ($4::TEXT IS NULL OR delivery_method = $4)
"#;

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching orders (buyer: {:?}, seller: {:?}, status: {:?})",
            req.buyer_id, req.seller_id, req.status
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let status = req.status.as_deref().filter(|s| !s.is_empty());
        let delivery_method = req.delivery_method.as_deref().filter(|s| !s.is_empty());

        let offset = Pagination::offset(req.page, req.page_size);

        let list_sql = format!(
            "SELECT *, COUNT(*) OVER() AS total_count FROM orders {ORDER_FILTERS} \
             ORDER BY created_at DESC, order_id DESC LIMIT $5 OFFSET $6"
        );
        let rows = sqlx::query_as::<_, CountedOrder>(&list_sql)
            .bind(req.buyer_id)
            .bind(req.seller_id)
            .bind(status)
            .bind(delivery_method)
            .bind(req.page_size as i64)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch orders: {:?}", e);
                RepositoryError::from(e)
            })?;

        let total = match rows.first() {
            Some(row) => row.total_count,
            None if offset > 0 => {
                let count_sql = format!("SELECT COUNT(*) FROM orders {ORDER_FILTERS}");
                sqlx::query_scalar::<_, i64>(&count_sql)
                    .bind(req.buyer_id)
                    .bind(req.seller_id)
                    .bind(status)
                    .bind(delivery_method)
                    .fetch_one(&mut *conn)
                    .await
                    .map_err(|e| {
                        error!("❌ Failed to count orders: {:?}", e);
                        RepositoryError::from(e)
                    })?
            }
            None => 0,
        };
        let orders = rows.into_iter().map(|r| r.order).collect();

        Ok((orders, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        info!("🆔 Fetching order by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>("SELECT * FROM orders WHERE order_id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch order {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(order)
    }

    async fn find_tracking(&self, order_ids: &[i32]) -> Result<Vec<OrderTracking>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let tracking = sqlx::query_as::<_, OrderTracking>(
            r#"
            SELECT tracking_id, order_id, status, time
            FROM order_tracking
            WHERE order_id = ANY($1)
            ORDER BY time ASC, tracking_id ASC
            "#,
        )
        .bind(order_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order tracking: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(tracking)
    }

    async fn summarize_by_status(
        &self,
        seller_id: Option<i32>,
    ) -> Result<Vec<OrderStatusSummary>, RepositoryError> {
        info!("📊 Summarizing orders by status (seller: {:?})", seller_id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let summary = sqlx::query_as::<_, OrderStatusSummary>(
            r#"
            SELECT o.status,
                   COUNT(*) AS count,
                   COALESCE(SUM(d.total), 0)::BIGINT AS total_amount
            FROM orders o
            LEFT JOIN (
                SELECT order_id, SUM(total_price) AS total
                FROM order_details
                GROUP BY order_id
            ) d ON d.order_id = o.order_id
            WHERE ($1::INTEGER IS NULL OR o.seller_id = $1)
            GROUP BY o.status
            ORDER BY o.status
            "#,
        )
        .bind(seller_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to summarize orders: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(summary)
    }
}
