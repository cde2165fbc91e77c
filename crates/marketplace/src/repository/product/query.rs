use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    domain::requests::product::FindAllProducts,
    model::product::{Product as ProductModel, Review as ReviewModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, domain::responses::Pagination, errors::RepositoryError};
use sqlx::FromRow;
use tracing::{error, info};

#[derive(FromRow)]
struct CountedProduct {
    #[sqlx(flatten)]
    product: ProductModel,
    total_count: i64,
}

const PRODUCT_FILTERS: &str = r#"
    WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
      AND ($2::BIGINT IS NULL OR price >= $2)
      AND ($3::BIGINT IS NULL OR price <= $3)
      AND ($4::TEXT IS NULL OR pickup_location ILIKE '%' || $4 || '%')
      AND ($5::TEXT IS NULL OR category ILIKE $5)
      AND ($6::INTEGER IS NULL OR seller_id = $6)
      AND (
          $7::BOOLEAN IS NULL OR
          $7 = (
              is_available
              AND stock > 0
              AND expired_date > (NOW() AT TIME ZONE 'UTC')
          )
      )
"#;

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching products with search: {:?}, location: {:?}, available: {:?}",
            req.search, req.location, req.is_available
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let search = req.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let location = req.location.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let category = req.category.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let offset = Pagination::offset(req.page, req.page_size);

        let list_sql = format!(
            "SELECT *, COUNT(*) OVER() AS total_count FROM products {PRODUCT_FILTERS} \
             ORDER BY created_at DESC, product_id DESC LIMIT $8 OFFSET $9"
        );
        let rows = sqlx::query_as::<_, CountedProduct>(&list_sql)
            .bind(search)
            .bind(req.min_price)
            .bind(req.max_price)
            .bind(location)
            .bind(category)
            .bind(req.seller_id)
            .bind(req.is_available)
            .bind(req.page_size as i64)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        let total = match rows.first() {
            Some(row) => row.total_count,
            None if offset > 0 => {
                let count_sql = format!("SELECT COUNT(*) FROM products {PRODUCT_FILTERS}");
                sqlx::query_scalar::<_, i64>(&count_sql)
                    .bind(search)
                    .bind(req.min_price)
                    .bind(req.max_price)
                    .bind(location)
                    .bind(category)
                    .bind(req.seller_id)
                    .bind(req.is_available)
                    .fetch_one(&mut *conn)
                    .await
                    .map_err(|e| {
                        error!("❌ Failed to count products: {:?}", e);
                        RepositoryError::from(e)
                    })?
            }
            None => 0,
        };
        let products = rows.into_iter().map(|r| r.product).collect();

        Ok((products, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product =
            sqlx::query_as::<_, ProductModel>("SELECT * FROM products WHERE product_id = $1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(|e| {
                    error!("❌ Failed to fetch product {}: {:?}", id, e);
                    RepositoryError::from(e)
                })?;

        Ok(product)
    }

    async fn find_reviews(&self, product_id: i32) -> Result<Vec<ReviewModel>, RepositoryError> {
        info!("💬 Fetching reviews for product {}", product_id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let reviews = sqlx::query_as::<_, ReviewModel>(
            r#"
            SELECT r.review_id, r.product_id, r.user_id, u.name AS user_name,
                   r.rating, r.comment, r.created_at
            FROM product_reviews r
            LEFT JOIN users u ON u.user_id = r.user_id
            WHERE r.product_id = $1
            ORDER BY r.created_at DESC, r.review_id DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch reviews for product {}: {:?}", product_id, e);
            RepositoryError::from(e)
        })?;

        Ok(reviews)
    }
}
