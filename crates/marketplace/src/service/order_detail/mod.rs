mod command;
mod query;

pub use self::command::{OrderDetailCommandService, OrderDetailCommandServiceDeps};
pub use self::query::OrderDetailQueryService;
