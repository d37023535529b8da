//! Browse slice: filtered, sorted catalog listing.

use anyhow::Context;
use axum::{
    Json,
    extract::{Query, State},
};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::infra::ClientError;

use super::Product;

//------------------------- Web API ----------------------------

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BrowseParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<SortOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl SortOption {
    fn order_by_clause(self) -> &'static str {
        match self {
            SortOption::NameAsc => " ORDER BY name ASC",
            SortOption::NameDesc => " ORDER BY name DESC",
            SortOption::PriceAsc => " ORDER BY price ASC",
            SortOption::PriceDesc => " ORDER BY price DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    /// Distinct non-empty categories of the whole catalog, independent of
    /// the active filters.
    pub categories: Vec<String>,
}

pub async fn browse_endpoint(
    State(pool): State<PgPool>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<CatalogPage>, ClientError> {
    let page = browse_products(&pool, &params).await?;
    Ok(Json(page))
}

//----------------------- Implementation --------------------------

pub async fn browse_products(
    pool: &PgPool,
    params: &BrowseParams,
) -> Result<CatalogPage, anyhow::Error> {
    let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
        "SELECT id, name, description, price, stock, image_url, category FROM products WHERE TRUE",
    );

    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
        builder
            .push(" AND category ILIKE ")
            .push_bind(format!("%{category}%"));
    }

    if let Some(sort) = params.sort {
        builder.push(sort.order_by_clause());
    }

    let products = builder
        .build_query_as::<Product>()
        .fetch_all(pool)
        .await
        .context("Problem in browse_products reading the products table.")?;

    let categories = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT category FROM products
         WHERE category IS NOT NULL AND category <> ''
         ORDER BY category",
    )
    .fetch_all(pool)
    .await
    .context("Problem in browse_products reading catalog categories.")?;

    Ok(CatalogPage {
        products,
        categories,
    })
}

//-------------------------- Tests -------------------------------
