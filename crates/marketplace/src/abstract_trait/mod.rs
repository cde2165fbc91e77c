pub mod order;
pub mod order_detail;
pub mod payment;
pub mod product;
pub mod upload;
pub mod user;
