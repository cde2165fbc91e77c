mod command;
mod query;

pub use self::command::OrderDetailCommandRepository;
pub use self::query::OrderDetailQueryRepository;
