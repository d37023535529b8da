use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_server::{
    domain::{
        StoreError, UserId,
        auth::CurrentUser,
        catalog::{
            ProductPayload, create_product_endpoint, delete_product_endpoint,
            update_product_endpoint,
        },
    },
    infra::ClientError,
};

use crate::test_utils::insert_user;

fn signed_in(id: UserId, email: &str, is_admin: bool) -> CurrentUser {
    CurrentUser {
        id,
        email: email.to_owned(),
        is_admin,
    }
}

fn payload(name: &str, price: Decimal, stock: i32) -> ProductPayload {
    ProductPayload {
        name: name.to_owned(),
        description: Some("A test product.".to_owned()),
        price,
        stock,
        image_url: None,
        category: Some("Hardware".to_owned()),
    }
}

#[sqlx::test]
async fn an_admin_can_create_update_and_delete_a_product(pool: PgPool) {
    let admin_id = insert_user(&pool, "admin@example.com", true).await;
    let admin = signed_in(admin_id, "admin@example.com", true);

    let Json(created) = create_product_endpoint(
        State(pool.clone()),
        admin.clone(),
        Json(payload("Widget", Decimal::new(1000, 2), 5)),
    )
    .await
    .expect("create should succeed");
    assert_eq!(created.name, "Widget");
    assert_eq!(created.stock, 5);

    let Json(updated) = update_product_endpoint(
        State(pool.clone()),
        admin.clone(),
        Path(created.id.into()),
        Json(payload("Deluxe Widget", Decimal::new(1500, 2), 8)),
    )
    .await
    .expect("update should succeed");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Deluxe Widget");
    assert_eq!(updated.price, Decimal::new(1500, 2));

    let Json(deleted_id) =
        delete_product_endpoint(State(pool.clone()), admin, Path(created.id.into()))
            .await
            .expect("delete should succeed");
    assert_eq!(deleted_id, created.id);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await
        .expect("count should load");
    assert_eq!(remaining, 0);

    pool.close().await;
}

#[sqlx::test]
async fn a_shopper_cannot_manage_products(pool: PgPool) {
    let admin_id = insert_user(&pool, "admin@example.com", true).await;
    let admin = signed_in(admin_id, "admin@example.com", true);
    let shopper_id = insert_user(&pool, "shopper@example.com", false).await;
    let shopper = signed_in(shopper_id, "shopper@example.com", false);

    let Json(existing) = create_product_endpoint(
        State(pool.clone()),
        admin,
        Json(payload("Widget", Decimal::new(1000, 2), 5)),
    )
    .await
    .expect("create should succeed");

    let create = create_product_endpoint(
        State(pool.clone()),
        shopper.clone(),
        Json(payload("Rogue Widget", Decimal::new(100, 2), 1)),
    )
    .await;
    match create {
        Err(ClientError::Domain(StoreError::Unauthorized)) => {}
        other => panic!("expected Unauthorized, got {other:?}"),
    }

    let update = update_product_endpoint(
        State(pool.clone()),
        shopper.clone(),
        Path(existing.id.into()),
        Json(payload("Hijacked Widget", Decimal::new(1, 2), 99)),
    )
    .await;
    match update {
        Err(ClientError::Domain(StoreError::Unauthorized)) => {}
        other => panic!("expected Unauthorized, got {other:?}"),
    }

    let delete =
        delete_product_endpoint(State(pool.clone()), shopper, Path(existing.id.into())).await;
    match delete {
        Err(ClientError::Domain(StoreError::Unauthorized)) => {}
        other => panic!("expected Unauthorized, got {other:?}"),
    }

    let untouched: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE name = 'Widget'")
        .fetch_one(&pool)
        .await
        .expect("count should load");
    assert_eq!(untouched, 1);

    pool.close().await;
}
