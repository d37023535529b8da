use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgConnectOptions;
use storefront_server::{
    AppState, construct_app_state,
    domain::{
        CartItemId, ProductId, UserId,
        auth::hash_password,
        checkout::{CheckoutSession, PaymentError, PaymentGateway, SessionLineItem},
    },
    infra::get_config_settings,
    start_server,
};
use tokio::task::JoinHandle;

pub async fn insert_user(pool: &PgPool, email: &str, is_admin: bool) -> UserId {
    let user_id = UserId::new();
    let password_hash = hash_password("secret1").expect("hashing should succeed");
    sqlx::query("INSERT INTO users (id, email, password_hash, is_admin) VALUES ($1, $2, $3, $4)")
        .bind(user_id)
        .bind(email)
        .bind(password_hash)
        .bind(is_admin)
        .execute(pool)
        .await
        .expect("user should be inserted");
    user_id
}

pub async fn insert_product(
    pool: &PgPool,
    name: &str,
    price: Decimal,
    stock: i32,
    category: Option<&str>,
) -> ProductId {
    let product_id = ProductId::new();
    sqlx::query(
        "INSERT INTO products (id, name, description, price, stock, category)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(product_id)
    .bind(name)
    .bind(format!("{name} description"))
    .bind(price)
    .bind(stock)
    .bind(category)
    .execute(pool)
    .await
    .expect("product should be inserted");
    product_id
}

pub async fn insert_cart_line(
    pool: &PgPool,
    user_id: UserId,
    product_id: ProductId,
    quantity: i32,
) -> CartItemId {
    let item_id = CartItemId::new();
    sqlx::query("INSERT INTO cart_items (id, user_id, product_id, quantity) VALUES ($1, $2, $3, $4)")
        .bind(item_id)
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .execute(pool)
        .await
        .expect("cart line should be inserted");
    item_id
}

pub async fn product_stock(pool: &PgPool, product_id: ProductId) -> i32 {
    sqlx::query_scalar::<_, i32>("SELECT stock FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .expect("stock should be readable")
}

pub async fn cart_line_count(pool: &PgPool, user_id: UserId) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cart_items WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("cart lines should be countable")
}

pub async fn order_count(pool: &PgPool, user_id: UserId) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("orders should be countable")
}

/// A payment gateway double that records the sessions it is asked to create.
pub struct StubGateway {
    pub calls: Mutex<Vec<Vec<SessionLineItem>>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn sessions_created(&self) -> usize {
        self.calls.lock().expect("lock should not be poisoned").len()
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_session(
        &self,
        line_items: &[SessionLineItem],
        _success_url: &str,
        _cancel_url: &str,
    ) -> Result<CheckoutSession, PaymentError> {
        self.calls
            .lock()
            .expect("lock should not be poisoned")
            .push(line_items.to_vec());
        Ok(CheckoutSession {
            id: "cs_test_1".to_owned(),
            url: "https://pay.example/cs_test_1".to_owned(),
        })
    }
}

pub async fn start_test_server(
    connect_options: PgConnectOptions,
) -> (JoinHandle<Result<(), anyhow::Error>>, AppState) {
    let mut settings = get_config_settings().expect("Could not read application configuration.");
    settings.database.database_name = connect_options
        .get_database()
        .expect("Expected database name.")
        .into();
    let app_state = construct_app_state(settings)
        .await
        .expect("Expected AppState to be created.");
    let server_handle = tokio::task::spawn(start_server(app_state.clone()));

    (server_handle, app_state)
}
