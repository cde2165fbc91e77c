pub mod order;
pub mod order_detail;
pub mod payment;
pub mod product;
pub mod upload;
pub mod user;

use crate::{abstract_trait::user::repository::DynUserQueryRepository, model::user::User};
use shared::errors::{RepositoryError, ServiceError};

/// Turns a repository miss into a 404 naming the missing entity.
pub(crate) fn or_not_found(entity: &'static str) -> impl Fn(RepositoryError) -> ServiceError {
    move |err| match err {
        RepositoryError::NotFound => ServiceError::NotFound(format!("{entity} not found")),
        other => ServiceError::Repo(other),
    }
}

/// Resolves the authenticated caller. A token for a deleted account is rejected.
pub(crate) async fn load_actor(
    users: &DynUserQueryRepository,
    actor_id: i32,
) -> Result<User, ServiceError> {
    users
        .find_by_id(actor_id)
        .await?
        .ok_or(ServiceError::InvalidCredentials)
}
