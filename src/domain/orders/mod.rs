mod history;
mod order;

pub use history::{order_detail_endpoint, orders_endpoint};
pub use order::{OrderItemView, OrderView, find_order, order_items, orders_for_user};
