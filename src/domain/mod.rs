pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
mod errors;
mod ids;
mod macros;
pub mod orders;
pub mod profile;
pub mod reviews;
pub mod wishlist;

pub use errors::StoreError;
pub use ids::*;
