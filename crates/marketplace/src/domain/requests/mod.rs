pub mod order;
pub mod order_detail;
pub mod payment;
pub mod product;
pub mod user;

pub(crate) fn default_page() -> i32 {
    1
}

pub(crate) fn default_page_size() -> i32 {
    10
}
