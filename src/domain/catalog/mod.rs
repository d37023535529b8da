mod browse;
mod manage;
mod product;
mod product_detail;

pub use browse::{BrowseParams, CatalogPage, SortOption, browse_endpoint, browse_products};
pub use manage::{
    create_product, create_product_endpoint, delete_product, delete_product_endpoint,
    update_product, update_product_endpoint,
};
pub use product::{Product, ProductInput, ProductPayload};
pub use product_detail::{ProductDetail, ReviewView, product_detail, product_detail_endpoint};
