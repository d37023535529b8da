use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_server::{
    domain::{
        StoreError,
        cart::{add_to_cart, cart_count, cart_view, remove_from_cart, set_quantity},
    },
    infra::ClientError,
};

use crate::test_utils::{cart_line_count, insert_cart_line, insert_product, insert_user};

#[sqlx::test]
async fn adding_an_out_of_stock_product_fails_and_leaves_the_cart_unchanged(pool: PgPool) {
    let user_id = insert_user(&pool, "shopper@example.com", false).await;
    let product_id = insert_product(&pool, "Sold Out", Decimal::new(500, 2), 0, None).await;

    let result = add_to_cart(&pool, user_id, product_id).await;

    match result {
        Err(ClientError::Domain(StoreError::OutOfStock)) => {}
        other => panic!("expected OutOfStock, got {other:?}"),
    }
    assert_eq!(cart_line_count(&pool, user_id).await, 0);

    pool.close().await;
}

#[sqlx::test]
async fn adding_increments_until_the_stock_ceiling(pool: PgPool) {
    let user_id = insert_user(&pool, "shopper@example.com", false).await;
    let product_id = insert_product(&pool, "Widget", Decimal::new(500, 2), 2, None).await;

    add_to_cart(&pool, user_id, product_id)
        .await
        .expect("first add should succeed");
    add_to_cart(&pool, user_id, product_id)
        .await
        .expect("second add should succeed");

    let result = add_to_cart(&pool, user_id, product_id).await;
    match result {
        Err(ClientError::Domain(StoreError::StockLimitReached)) => {}
        other => panic!("expected StockLimitReached, got {other:?}"),
    }

    let view = cart_view(&pool, user_id).await.expect("cart should load");
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].quantity, 2);

    pool.close().await;
}

#[sqlx::test]
async fn quantity_above_stock_is_rejected(pool: PgPool) {
    let user_id = insert_user(&pool, "shopper@example.com", false).await;
    let product_id = insert_product(&pool, "Widget", Decimal::new(500, 2), 3, None).await;
    let item_id = insert_cart_line(&pool, user_id, product_id, 1).await;

    let result = set_quantity(&pool, user_id, item_id, 4).await;
    match result {
        Err(ClientError::Domain(StoreError::InsufficientStock { product_name })) => {
            assert_eq!(product_name, "Widget");
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    set_quantity(&pool, user_id, item_id, 3)
        .await
        .expect("quantity within stock should be accepted");
    let view = cart_view(&pool, user_id).await.expect("cart should load");
    assert_eq!(view.items[0].quantity, 3);

    pool.close().await;
}

#[sqlx::test]
async fn another_users_cart_item_cannot_be_removed(pool: PgPool) {
    let owner = insert_user(&pool, "owner@example.com", false).await;
    let intruder = insert_user(&pool, "intruder@example.com", false).await;
    let product_id = insert_product(&pool, "Widget", Decimal::new(500, 2), 3, None).await;
    let item_id = insert_cart_line(&pool, owner, product_id, 1).await;

    let result = remove_from_cart(&pool, intruder, item_id).await;
    match result {
        Err(ClientError::Domain(StoreError::Unauthorized)) => {}
        other => panic!("expected Unauthorized, got {other:?}"),
    }
    assert_eq!(cart_line_count(&pool, owner).await, 1);

    remove_from_cart(&pool, owner, item_id)
        .await
        .expect("the owner can remove their item");
    assert_eq!(cart_line_count(&pool, owner).await, 0);

    pool.close().await;
}

#[sqlx::test]
async fn cart_view_sums_line_totals_and_quantities(pool: PgPool) {
    let user_id = insert_user(&pool, "shopper@example.com", false).await;
    let book = insert_product(&pool, "Book", Decimal::new(1250, 2), 5, None).await;
    let pen = insert_product(&pool, "Pen", Decimal::new(199, 2), 10, None).await;
    insert_cart_line(&pool, user_id, book, 2).await;
    insert_cart_line(&pool, user_id, pen, 3).await;

    let view = cart_view(&pool, user_id).await.expect("cart should load");
    assert_eq!(view.total, Decimal::new(3097, 2)); // 2 x 12.50 + 3 x 1.99
    assert_eq!(view.cart_count, 5);
    assert_eq!(cart_count(&pool, user_id).await.expect("count should load"), 5);

    pool.close().await;
}
