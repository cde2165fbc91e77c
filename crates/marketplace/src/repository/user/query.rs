use crate::{
    abstract_trait::user::repository::UserQueryRepositoryTrait,
    domain::requests::user::{FindAllUsers, FindSellers},
    model::user::User as UserModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, domain::responses::Pagination, errors::RepositoryError};
use sqlx::FromRow;
use tracing::{error, info};

#[derive(FromRow)]
struct CountedUser {
    #[sqlx(flatten)]
    user: UserModel,
    total_count: i64,
}

const USER_FILTERS: &str = r#"
    WHERE ($1::TEXT IS NULL OR LOWER(email) = LOWER($1))
      AND ($2::TEXT IS NULL OR role = $2)
"#;

const SELLER_FILTERS: &str = r#"
    WHERE role = 'seller'
      AND (
          $1::TEXT IS NULL OR
          name ILIKE '%' || $1 || '%' OR
          store_name ILIKE '%' || $1 || '%'
      )
      AND ($2::TEXT IS NULL OR address ILIKE '%' || $2 || '%')
      AND ($3::TEXT IS NULL OR category = $3 OR store_category = $3)
"#;

/// `None` means the page came back empty past the first page and the total
/// still has to be counted.
fn split_counted(rows: Vec<CountedUser>, offset: i64) -> (Vec<UserModel>, Option<i64>) {
    let total = match rows.first() {
        Some(row) => Some(row.total_count),
        None if offset > 0 => None,
        None => Some(0),
    };
    (rows.into_iter().map(|r| r.user).collect(), total)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<UserModel>, i64), RepositoryError> {
        info!("🔍 Fetching users with email: {:?}", req.email);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let email = non_empty(&req.email);
        let role = non_empty(&req.role);
        let offset = Pagination::offset(req.page, req.page_size);

        let list_sql = format!(
            "SELECT *, COUNT(*) OVER() AS total_count FROM users {USER_FILTERS} \
             ORDER BY created_at DESC, user_id DESC LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, CountedUser>(&list_sql)
            .bind(email)
            .bind(role)
            .bind(req.page_size as i64)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch users: {:?}", e);
                RepositoryError::from(e)
            })?;

        let (users, total) = split_counted(rows, offset);
        let total = match total {
            Some(total) => total,
            None => {
                let count_sql = format!("SELECT COUNT(*) FROM users {USER_FILTERS}");
                sqlx::query_scalar::<_, i64>(&count_sql)
                    .bind(email)
                    .bind(role)
                    .fetch_one(&mut *conn)
                    .await
                    .map_err(|e| {
                        error!("❌ Failed to count users: {:?}", e);
                        RepositoryError::from(e)
                    })?
            }
        };

        Ok((users, total))
    }

    async fn find_sellers(
        &self,
        req: &FindSellers,
    ) -> Result<(Vec<UserModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching sellers with search: {:?}, location: {:?}",
            req.search, req.location
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let search = non_empty(&req.search);
        let location = non_empty(&req.location);
        let category = non_empty(&req.category);
        let offset = Pagination::offset(req.page, req.page_size);

        let list_sql = format!(
            "SELECT *, COUNT(*) OVER() AS total_count FROM users {SELLER_FILTERS} \
             ORDER BY created_at DESC, user_id DESC LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, CountedUser>(&list_sql)
            .bind(search)
            .bind(location)
            .bind(category)
            .bind(req.page_size as i64)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch sellers: {:?}", e);
                RepositoryError::from(e)
            })?;

        let (sellers, total) = split_counted(rows, offset);
        let total = match total {
            Some(total) => total,
            None => {
                let count_sql = format!("SELECT COUNT(*) FROM users {SELLER_FILTERS}");
                sqlx::query_scalar::<_, i64>(&count_sql)
                    .bind(search)
                    .bind(location)
                    .bind(category)
                    .fetch_one(&mut *conn)
                    .await
                    .map_err(|e| {
                        error!("❌ Failed to count sellers: {:?}", e);
                        RepositoryError::from(e)
                    })?
            }
        };

        Ok((sellers, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
        info!("🆔 Fetching user by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch user {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        info!("📧 Fetching user by email: {}", email);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user =
            sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
                .bind(email)
                .fetch_optional(&mut *conn)
                .await
                .map_err(|e| {
                    error!("❌ Failed to fetch user by email {}: {:?}", email, e);
                    RepositoryError::from(e)
                })?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::{StoreStatus, UserRole, sample_user};

    #[test]
    fn empty_page_past_the_end_needs_a_recount() {
        let (users, total) = split_counted(Vec::new(), 40);
        assert!(users.is_empty());
        assert_eq!(total, None);

        let (_, total) = split_counted(Vec::new(), 0);
        assert_eq!(total, Some(0));

        let rows = vec![CountedUser {
            user: sample_user(3, UserRole::Seller, StoreStatus::Approved),
            total_count: 7,
        }];
        let (users, total) = split_counted(rows, 20);
        assert_eq!(users.len(), 1);
        assert_eq!(total, Some(7));
    }
}
