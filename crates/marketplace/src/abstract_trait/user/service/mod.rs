mod auth;
mod command;
mod query;

pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::command::{DynUserCommandService, UserCommandServiceTrait};
pub use self::query::{DynUserQueryService, UserQueryServiceTrait};
