mod command;
mod query;

pub use self::command::{ProductCommandService, ProductCommandServiceDeps};
pub use self::query::{ProductQueryService, ProductQueryServiceDeps};
