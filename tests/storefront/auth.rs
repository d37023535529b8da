use sqlx::PgPool;
use storefront_server::{
    domain::{
        SessionToken, StoreError,
        auth::{LoginPayload, RegisterCommand, authenticate, login, register_user},
    },
    infra::ClientError,
};

const IDLE_MINUTES: u16 = 30;

#[sqlx::test]
async fn registered_user_can_log_in_and_authenticate(pool: PgPool) {
    let user_id = register_user(
        &pool,
        RegisterCommand {
            email: "shopper@example.com".to_owned(),
            password: "secret1".to_owned(),
        },
    )
    .await
    .expect("registration should succeed");

    let response = login(
        &pool,
        &LoginPayload {
            email: "Shopper@Example.com".to_owned(),
            password: "secret1".to_owned(),
        },
        IDLE_MINUTES,
    )
    .await
    .expect("login should succeed");
    assert_eq!(response.user_id, user_id);

    let current = authenticate(&pool, response.token, IDLE_MINUTES)
        .await
        .expect("authentication should not fail")
        .expect("session should be live");
    assert_eq!(current.id, user_id);
    assert_eq!(current.email, "shopper@example.com");
    assert!(!current.is_admin);

    pool.close().await;
}

#[sqlx::test]
async fn wrong_password_is_rejected_without_leaking_which_part_failed(pool: PgPool) {
    register_user(
        &pool,
        RegisterCommand {
            email: "shopper@example.com".to_owned(),
            password: "secret1".to_owned(),
        },
    )
    .await
    .expect("registration should succeed");

    for (email, password) in [
        ("shopper@example.com", "wrong-password"),
        ("unknown@example.com", "secret1"),
    ] {
        let result = login(
            &pool,
            &LoginPayload {
                email: email.to_owned(),
                password: password.to_owned(),
            },
            IDLE_MINUTES,
        )
        .await;
        match result {
            Err(ClientError::Domain(StoreError::InvalidCredentials)) => {}
            other => panic!("expected InvalidCredentials, got {other:?}"),
        }
    }

    pool.close().await;
}

#[sqlx::test]
async fn duplicate_registration_is_rejected(pool: PgPool) {
    let command = RegisterCommand {
        email: "shopper@example.com".to_owned(),
        password: "secret1".to_owned(),
    };
    register_user(&pool, command.clone())
        .await
        .expect("first registration should succeed");

    let result = register_user(&pool, command).await;
    match result {
        Err(ClientError::Domain(StoreError::EmailTaken)) => {}
        other => panic!("expected EmailTaken, got {other:?}"),
    }

    pool.close().await;
}

#[sqlx::test]
async fn unknown_tokens_do_not_authenticate(pool: PgPool) {
    let current = authenticate(&pool, SessionToken::new(), IDLE_MINUTES)
        .await
        .expect("authentication should not fail");
    assert!(current.is_none());

    pool.close().await;
}
