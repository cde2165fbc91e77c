mod command;
mod query;

pub use self::command::{DynOrderDetailCommandService, OrderDetailCommandServiceTrait};
pub use self::query::{DynOrderDetailQueryService, OrderDetailQueryServiceTrait};
