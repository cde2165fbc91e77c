pub mod order;
pub mod order_detail;
pub mod product;
pub mod user;
