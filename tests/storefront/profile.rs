use sqlx::PgPool;
use storefront_server::domain::profile::{
    ProfilePayload, UpdateProfileCommand, profile_for_user, update_profile,
};

use crate::test_utils::insert_user;

#[sqlx::test]
async fn updating_the_profile_persists_address_and_preferences(pool: PgPool) {
    let user_id = insert_user(&pool, "shopper@example.com", false).await;

    let before = profile_for_user(&pool, user_id)
        .await
        .expect("profile should load");
    assert_eq!(before.address, None);
    assert_eq!(before.preferences, None);

    let command = UpdateProfileCommand::from(ProfilePayload {
        address: Some("12 High Street".to_owned()),
        preferences: Some("email only".to_owned()),
    });
    let updated = update_profile(&pool, user_id, command)
        .await
        .expect("update should succeed");
    assert_eq!(updated.email, "shopper@example.com");
    assert_eq!(updated.address.as_deref(), Some("12 High Street"));

    let after = profile_for_user(&pool, user_id)
        .await
        .expect("profile should load");
    assert_eq!(after, updated);

    pool.close().await;
}

#[sqlx::test]
async fn a_blank_submission_clears_stored_fields(pool: PgPool) {
    let user_id = insert_user(&pool, "shopper@example.com", false).await;

    let command = UpdateProfileCommand::from(ProfilePayload {
        address: Some("12 High Street".to_owned()),
        preferences: Some("email only".to_owned()),
    });
    update_profile(&pool, user_id, command)
        .await
        .expect("update should succeed");

    let cleared = UpdateProfileCommand::from(ProfilePayload {
        address: Some("   ".to_owned()),
        preferences: None,
    });
    let after = update_profile(&pool, user_id, cleared)
        .await
        .expect("update should succeed");
    assert_eq!(after.address, None);
    assert_eq!(after.preferences, None);

    pool.close().await;
}
