mod add_item;
mod list;
mod remove_item;

pub use add_item::{add_to_wishlist, add_to_wishlist_endpoint};
pub use list::{WishlistEntry, wishlist, wishlist_endpoint};
pub use remove_item::{remove_from_wishlist, remove_from_wishlist_endpoint};
