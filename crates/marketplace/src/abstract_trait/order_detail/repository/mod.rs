mod command;
mod query;

pub use self::command::{DynOrderDetailCommandRepository, OrderDetailCommandRepositoryTrait};
pub use self::query::{DynOrderDetailQueryRepository, OrderDetailQueryRepositoryTrait};
