mod auth;
mod command;
mod query;

pub use self::auth::{AuthService, AuthServiceDeps};
pub use self::command::{UserCommandService, UserCommandServiceDeps};
pub use self::query::UserQueryService;
