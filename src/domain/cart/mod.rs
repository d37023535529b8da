mod add_item;
mod remove_item;
mod update_quantity;
mod view_cart;

pub use add_item::{add_to_cart, add_to_cart_endpoint};
pub use remove_item::{remove_from_cart, remove_from_cart_endpoint};
pub use update_quantity::{QuantityPayload, set_quantity, update_cart_endpoint};
pub use view_cart::{CartLineView, CartView, cart_count, cart_endpoint, cart_view};
