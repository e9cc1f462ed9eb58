// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User store integration tests.
//!
//! These tests require a MongoDB server; set `MONGODB_URI` to run them.
//! Each test works in its own freshly named database and drops it on
//! success.

use bson::doc;
use bson::oid::ObjectId;
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};
use users_db_mongo::models::user::user_indexes;
use users_db_mongo::{
    Model, MongoDb, OAuthAccount, ParseId, StoreError, User, UserDatabase, UserStore,
};

mod common;
use common::test_db;

async fn user_store(db: &MongoDb) -> UserStore<User> {
    db.init_model::<User>().await.unwrap();
    UserStore::new(db.clone())
}

async fn oauth_user_store(db: &MongoDb) -> UserStore<User, OAuthAccount> {
    db.init_model::<User>().await.unwrap();
    UserStore::new(db.clone())
}

fn oauth_account1() -> bson::Document {
    doc! {
        "oauth_name": "service1",
        "access_token": "TOKEN",
        "expires_at": 1579000751_i64,
        "account_id": "user_oauth1",
        "account_email": "king.arthur@camelot.bt",
    }
}

fn oauth_account2() -> bson::Document {
    doc! {
        "oauth_name": "service2",
        "access_token": "TOKEN",
        "expires_at": 1579000751_i64,
        "account_id": "user_oauth2",
        "account_email": "king.arthur@camelot.bt",
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BASIC USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_lifecycle() {
    require_mongodb!();

    let db = test_db().await;
    let store = user_store(&db).await;

    // Create
    let user = store
        .create(doc! { "email": "lancelot@camelot.bt", "hashed_password": "guinevere" })
        .await
        .unwrap();
    let id = user.id.expect("created user should have an id");
    assert_eq!(user.email, "lancelot@camelot.bt");
    assert!(user.is_active);
    assert!(!user.is_superuser);
    assert!(!user.is_verified);

    // Update
    let updated = store
        .update(user, doc! { "is_superuser": true })
        .await
        .unwrap();
    assert!(updated.is_superuser);
    assert_eq!(updated.id, Some(id));

    // Get by id
    let fetched = store.get(&id).await.unwrap().expect("user by id");
    assert_eq!(fetched, updated);

    // Get by id from a parsed string
    let parsed = store.parse_id(id.to_hex()).unwrap();
    assert_eq!(store.get(&parsed).await.unwrap(), Some(updated.clone()));

    // Get by email, exact and with different case
    let by_email = store.get_by_email("lancelot@camelot.bt").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(Some(id)));
    let by_email = store.get_by_email("Lancelot@camelot.bt").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(Some(id)));

    // Unknown email
    assert!(store
        .get_by_email("galahad@camelot.bt")
        .await
        .unwrap()
        .is_none());

    // Delete
    store.delete(&updated).await.unwrap();
    assert!(store.get(&id).await.unwrap().is_none());

    db.drop_database().await.unwrap();
}

#[tokio::test]
async fn test_get_unknown_id_returns_none() {
    require_mongodb!();

    let db = test_db().await;
    let store = user_store(&db).await;

    assert!(store.get(&ObjectId::new()).await.unwrap().is_none());

    db.drop_database().await.unwrap();
}

#[tokio::test]
async fn test_email_lookup_is_case_insensitive_not_pattern_based() {
    require_mongodb!();

    let cases = [
        ("lancelot@camelot.bt", "lancelot@camelot.bt", true),
        ("lancelot@camelot.bt", "LanceloT@camelot.bt", true),
        ("lancelot@camelot.bt", "lancelot.@camelot.bt", false),
        ("lancelot@camelot.bt", "lancelot.*", false),
        ("lancelot@camelot.bt", "lancelot+guinevere@camelot.bt", false),
        (
            "lancelot+guinevere@camelot.bt",
            "lancelot+guinevere@camelot.bt",
            true,
        ),
        ("квіточка@пошта.укр", "квіточка@пошта.укр", true),
        ("квіточка@пошта.укр", "КВІТОЧКА@ПОШТА.УКР", true),
        // Case folds, accents do not
        ("lancelot@camelot.bt", "lancélot@camelot.bt", false),
        ("lancélot@camelot.bt", "LANCÉLOT@camelot.bt", true),
        ("lancélot@camelot.bt", "lancelot@camelot.bt", false),
    ];

    for (stored, query, should_match) in cases {
        let db = test_db().await;
        let store = user_store(&db).await;

        let user = store
            .create(doc! { "email": stored, "hashed_password": "guinevere" })
            .await
            .unwrap();

        let found = store.get_by_email(query).await.unwrap();
        if should_match {
            assert_eq!(
                found.map(|u| u.id),
                Some(user.id),
                "{query} should match {stored}"
            );
        } else {
            assert!(found.is_none(), "{query} should not match {stored}");
        }

        db.drop_database().await.unwrap();
    }
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    require_mongodb!();

    let db = test_db().await;
    let store = user_store(&db).await;

    store
        .create(doc! { "email": "lancelot@camelot.bt", "hashed_password": "guinevere" })
        .await
        .unwrap();

    let err = store
        .create(doc! { "email": "lancelot@camelot.bt", "hashed_password": "guinevere" })
        .await
        .unwrap_err();
    assert!(err.is_duplicate_key(), "unexpected error: {err:?}");

    // Differs only in case
    let err = store
        .create(doc! { "email": "LANCELOT@camelot.bt", "hashed_password": "guinevere" })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey(_)));

    let count = db
        .database()
        .unwrap()
        .collection::<bson::Document>(User::COLLECTION)
        .count_documents(doc! {})
        .await
        .unwrap();
    assert_eq!(count, 1);

    db.drop_database().await.unwrap();
}

#[tokio::test]
async fn test_emails_differing_by_accent_are_distinct() {
    require_mongodb!();

    let db = test_db().await;
    let store = user_store(&db).await;

    let plain = store
        .create(doc! { "email": "lancelot@camelot.bt", "hashed_password": "guinevere" })
        .await
        .unwrap();
    let accented = store
        .create(doc! { "email": "lancélot@camelot.bt", "hashed_password": "guinevere" })
        .await
        .unwrap();
    assert_ne!(plain.id, accented.id);

    let found = store.get_by_email("LANCÉLOT@camelot.bt").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(accented.id));
    let found = store.get_by_email("Lancelot@camelot.bt").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(plain.id));

    db.drop_database().await.unwrap();
}

#[tokio::test]
async fn test_update_with_unknown_field_is_rejected() {
    require_mongodb!();

    let db = test_db().await;
    let store = user_store(&db).await;

    let user = store
        .create(doc! { "email": "lancelot@camelot.bt", "hashed_password": "guinevere" })
        .await
        .unwrap();
    let id = user.id.unwrap();

    let err = store
        .update(user, doc! { "is_superuer": true })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)));

    let fetched = store.get(&id).await.unwrap().unwrap();
    assert!(!fetched.is_superuser);

    db.drop_database().await.unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// CUSTOM USER MODEL
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserWithFields {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    email: String,
    hashed_password: String,
    #[serde(default)]
    is_active: bool,
    first_name: String,
}

impl Model for UserWithFields {
    type Id = ObjectId;

    const COLLECTION: &'static str = "users_with_fields";

    fn id(&self) -> Option<&ObjectId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn indexes() -> Vec<IndexModel> {
        user_indexes()
    }
}

#[tokio::test]
async fn test_custom_fields_round_trip() {
    require_mongodb!();

    let db = test_db().await;
    db.init_model::<UserWithFields>().await.unwrap();
    let store: UserStore<UserWithFields> = UserStore::new(db.clone());

    let user = store
        .create(doc! {
            "email": "lancelot@camelot.bt",
            "hashed_password": "guinevere",
            "is_active": true,
            "first_name": "Lancelot",
        })
        .await
        .unwrap();
    let id = user.id.unwrap();

    let fetched = store.get(&id).await.unwrap().expect("custom user by id");
    assert_eq!(fetched.first_name, "Lancelot");

    let updated = store
        .update(fetched, doc! { "first_name": "Galahad" })
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Galahad");

    let fetched = store
        .get_by_email("LANCELOT@camelot.bt")
        .await
        .unwrap()
        .expect("custom user by email");
    assert_eq!(fetched.first_name, "Galahad");

    let err = store
        .get_by_oauth_account("service1", "user_oauth1")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Unsupported(_)));

    db.drop_database().await.unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// OAUTH TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_oauth_account_lifecycle() {
    require_mongodb!();

    let db = test_db().await;
    let store = oauth_user_store(&db).await;

    let user = store
        .create(doc! { "email": "lancelot@camelot.bt", "hashed_password": "guinevere" })
        .await
        .unwrap();
    let id = user.id.unwrap();

    // Link two accounts, order preserved
    let user = store.add_oauth_account(user, oauth_account1()).await.unwrap();
    let user = store.add_oauth_account(user, oauth_account2()).await.unwrap();
    assert_eq!(user.oauth_accounts.len(), 2);
    assert_eq!(user.oauth_accounts[0].oauth_name, "service1");
    assert_eq!(user.oauth_accounts[1].oauth_name, "service2");

    // Update the first account only
    let first = user.oauth_accounts[0].clone();
    let second = user.oauth_accounts[1].clone();
    let user = store
        .update_oauth_account(user, &first, doc! { "access_token": "NEW_TOKEN" })
        .await
        .unwrap();
    assert_eq!(user.oauth_accounts[0].access_token, "NEW_TOKEN");
    assert_eq!(user.oauth_accounts[0].id, first.id);
    assert_eq!(user.oauth_accounts[0].expires_at, first.expires_at);
    assert_eq!(user.oauth_accounts[1], second);

    // Persisted state is visible through every lookup
    let by_id = store.get(&id).await.unwrap().expect("user by id");
    assert_eq!(by_id.oauth_accounts, user.oauth_accounts);

    let by_email = store
        .get_by_email("lancelot@camelot.bt")
        .await
        .unwrap()
        .expect("user by email");
    assert_eq!(by_email.oauth_accounts, user.oauth_accounts);

    let by_oauth = store
        .get_by_oauth_account("service1", "user_oauth1")
        .await
        .unwrap()
        .expect("user by oauth account");
    assert_eq!(by_oauth.id, Some(id));
    assert_eq!(by_oauth.oauth_accounts[0].access_token, "NEW_TOKEN");

    let by_oauth = store
        .get_by_oauth_account("service2", "user_oauth2")
        .await
        .unwrap();
    assert_eq!(by_oauth.map(|u| u.id), Some(Some(id)));

    // Unknown account
    assert!(store
        .get_by_oauth_account("foo", "bar")
        .await
        .unwrap()
        .is_none());

    // Provider and account id must match on the same entry
    assert!(store
        .get_by_oauth_account("service1", "user_oauth2")
        .await
        .unwrap()
        .is_none());

    db.drop_database().await.unwrap();
}

#[tokio::test]
async fn test_update_unmatched_oauth_account_is_noop() {
    require_mongodb!();

    let db = test_db().await;
    let store = oauth_user_store(&db).await;

    let user = store
        .create(doc! { "email": "lancelot@camelot.bt", "hashed_password": "guinevere" })
        .await
        .unwrap();
    let user = store.add_oauth_account(user, oauth_account1()).await.unwrap();
    let before = user.oauth_accounts.clone();

    let stranger: OAuthAccount = bson::from_document(doc! {
        "oauth_name": "service3",
        "access_token": "TOKEN",
        "account_id": "user_oauth3",
        "account_email": "galahad@camelot.bt",
    })
    .unwrap();

    let user = store
        .update_oauth_account(user, &stranger, doc! { "access_token": "NEW_TOKEN" })
        .await
        .unwrap();
    assert_eq!(user.oauth_accounts, before);

    let fetched = store.get(&user.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(fetched.oauth_accounts, before);

    db.drop_database().await.unwrap();
}

#[tokio::test]
async fn test_oauth_store_reads_users_without_accounts() {
    require_mongodb!();

    let db = test_db().await;

    // Written by a store with no OAuth support
    let plain = user_store(&db).await;
    let user = plain
        .create(doc! { "email": "lancelot@camelot.bt", "hashed_password": "guinevere" })
        .await
        .unwrap();

    let store = oauth_user_store(&db).await;
    let fetched = store.get(&user.id.unwrap()).await.unwrap().unwrap();
    assert!(fetched.oauth_accounts.is_empty());

    let fetched = store.add_oauth_account(fetched, oauth_account1()).await.unwrap();
    assert_eq!(fetched.oauth_accounts.len(), 1);

    db.drop_database().await.unwrap();
}
