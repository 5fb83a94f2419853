//! Integration tests for MySqlUserDaoImpl and UserRepositoryImpl.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use azchat_core::{AzchatError, User, UserId};
use azchat_repository::{sql, DatabasePoolInterface, UserDao, UserRepository, UserRepositoryImpl};
use common::TestDatabase;
use std::sync::Arc;

fn create_test_user(name_id: &str, first_name: &str, last_name: &str) -> User {
    User::new(name_id, "google", first_name, last_name)
        .with_contact(format!("{}@example.com", name_id), 44, 7_700_900_123)
        .with_author("integration-test")
}

#[tokio::test]
async fn test_create_and_find_by_id() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    let user = create_test_user("sub-100", "John", "Smith")
        .with_photo_url("https://cdn.example.com/john.png");
    let created = dao.create(&user).await.expect("Failed to create user");
    assert!(created.id.is_assigned());

    let found = dao
        .find_by_id(created.id)
        .await
        .expect("Query failed")
        .expect("User not found");

    assert_eq!(found, created);
    assert_eq!(found.phone_number, 7_700_900_123);
    assert_eq!(found.created_by, "integration-test");
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    let result = dao.find_by_id(UserId::new(999_999)).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_photo_url() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    let with_photo = dao
        .create(&create_test_user("a", "Ann", "Lee").with_photo_url("https://cdn.example.com/a.png"))
        .await
        .unwrap();
    let without_photo = dao.create(&create_test_user("b", "Bob", "Lee")).await.unwrap();

    assert_eq!(
        dao.find_photo_url(with_photo.id).await.unwrap().as_deref(),
        Some("https://cdn.example.com/a.png")
    );
    assert_eq!(dao.find_photo_url(without_photo.id).await.unwrap().as_deref(), Some(""));
    assert_eq!(dao.find_photo_url(UserId::new(424_242)).await.unwrap(), None);
}

#[tokio::test]
async fn test_find_by_name_id_and_provider() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    dao.create(&create_test_user("sub-1", "John", "Smith")).await.unwrap();
    let mut github = create_test_user("sub-2", "John", "Smith");
    github.identity_provider = "github".to_string();
    dao.create(&github).await.unwrap();

    assert_eq!(dao.find_by_name_id("sub-1").await.unwrap().len(), 1);
    assert_eq!(
        dao.find_by_name_id_and_provider("sub-2", "github").await.unwrap().len(),
        1
    );
    // Each value matches some row but never the same one.
    assert!(dao
        .find_by_name_id_and_provider("sub-1", "github")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_duplicate_identity_is_allowed() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    let first = dao.create(&create_test_user("dup", "John", "Smith")).await.unwrap();
    let second = dao.create(&create_test_user("dup", "Jane", "Smith")).await.unwrap();
    assert_ne!(first.id, second.id);

    let users = dao.find_by_name_id_and_provider("dup", "google").await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, first.id);
}

#[tokio::test]
async fn test_prefix_searches() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    dao.create(&create_test_user("1", "John", "Smith")).await.unwrap();
    dao.create(&create_test_user("2", "Joanna", "Brown")).await.unwrap();
    dao.create(&create_test_user("3", "Mary", "Johnson")).await.unwrap();

    let first: Vec<String> = dao
        .find_by_first_name("Jo")
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.first_name)
        .collect();
    assert_eq!(first, vec!["John", "Joanna"]);

    let last = dao.find_by_last_name("Jo").await.unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].first_name, "Mary");

    assert_eq!(dao.find_by_first_or_last_name("Jo").await.unwrap().len(), 3);
    assert!(dao.find_by_first_name("Zed").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_prefix_wildcards_are_not_escaped() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    dao.create(&create_test_user("1", "John", "Smith")).await.unwrap();
    dao.create(&create_test_user("2", "Mary", "Jones")).await.unwrap();

    assert_eq!(dao.find_by_first_name("%").await.unwrap().len(), 2);
    assert_eq!(dao.find_by_first_name("_ohn").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_changes_profile_fields_only() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    let created = dao.create(&create_test_user("sub-7", "John", "Smith")).await.unwrap();

    let mut changed = created.clone();
    changed.update_profile("Johnny", "Smithers", "https://cdn.example.com/j.png", "j@example.org");
    changed.update_phone(1, 5_550_100);
    changed.identity_provider = "ignored".to_string();
    changed.modified_by = "ignored".to_string();

    let returned = dao.update(&changed).await.expect("Failed to update");
    assert_eq!(returned, changed);

    let stored = dao.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Johnny");
    assert_eq!(stored.last_name, "Smithers");
    assert_eq!(stored.photo_url, "https://cdn.example.com/j.png");
    assert_eq!(stored.email, "j@example.org");
    assert_eq!(stored.phone_country_code, 1);
    assert_eq!(stored.phone_number, 5_550_100);
    assert_eq!(stored.identity_provider, "google");
    assert_eq!(stored.modified_by, "integration-test");
    assert_eq!(stored.date_created, created.date_created);
    assert_eq!(stored.date_modified, created.date_modified);
}

#[tokio::test]
async fn test_update_unknown_name_id_is_not_an_error() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    let ghost = create_test_user("nobody", "No", "Body");
    let returned = dao.update(&ghost).await.expect("Update failed");
    assert_eq!(returned, ghost);
    assert!(dao.find_by_name_id("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let db = TestDatabase::new().await;
    let dao = Arc::new(db.dao());

    let tasks = (0..8).map(|i| {
        let dao = Arc::clone(&dao);
        async move {
            dao.create(&create_test_user(&format!("c-{}", i), "Con", "Current"))
                .await
                .expect("Failed to create user")
        }
    });
    let created = futures::future::join_all(tasks).await;

    let mut ids: Vec<i64> = created.iter().map(|u| u.id.into_inner()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}

#[tokio::test]
async fn test_create_user_table_is_idempotent() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    dao.create(&create_test_user("keep", "Kept", "Row")).await.unwrap();

    dao.create_user_table().await.expect("Second schema creation failed");
    dao.create_user_table().await.expect("Third schema creation failed");

    assert_eq!(dao.find_by_name_id("keep").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_existing_index_name_is_recognized() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let err = sqlx::query(sql::CREATE_USER_TABLE_INDEX)
        .execute(pool.inner())
        .await
        .expect_err("index already exists");
    assert!(sql::is_duplicate_index(&err));
}

#[tokio::test]
async fn test_concurrent_schema_creation_succeeds() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    sqlx::query(&format!("DROP INDEX {} ON users", sql::USER_IDENTITY_INDEX))
        .execute(pool.inner())
        .await
        .expect("Failed to drop index");

    let dao = Arc::new(db.dao());
    let tasks = (0..4).map(|_| {
        let dao = Arc::clone(&dao);
        async move { dao.create_user_table().await }
    });
    for result in futures::future::join_all(tasks).await {
        result.expect("Concurrent schema creation failed");
    }

    let indexes: i64 = sqlx::query_scalar(sql::USER_INDEX_EXISTS)
        .bind(sql::USER_IDENTITY_INDEX)
        .fetch_one(pool.inner())
        .await
        .unwrap();
    assert!(indexes > 0);
}

#[tokio::test]
async fn test_oversized_value_is_invalid_input() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    let user = create_test_user("long", &"x".repeat(150), "Smith");
    let err = dao.create(&user).await.unwrap_err();

    assert!(matches!(err, AzchatError::Validation(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_closed_pool_is_connectivity_error() {
    let db = TestDatabase::new().await;
    let dao = db.dao();

    db.pool().close().await;

    let err = dao.find_by_id(UserId::new(1)).await.unwrap_err();
    assert!(matches!(err, AzchatError::Connectivity(_)));
    assert!(err.is_retriable());
}

#[tokio::test]
async fn test_repository_validates_before_writing() {
    let db = TestDatabase::new().await;
    let repo = UserRepositoryImpl::new(Arc::new(db.dao()));

    let saved = repo.save(&create_test_user("repo-1", "Ann", "Lee")).await.unwrap();
    assert!(repo.exists_by_identity("repo-1", "google").await.unwrap());
    assert_eq!(repo.search_by_name("Le").await.unwrap().len(), 1);

    let invalid = create_test_user("repo-2", "Ann", "Lee").with_contact("not-an-email", 1, 1);
    let err = repo.save(&invalid).await.unwrap_err();
    assert!(matches!(err, AzchatError::Validation(_)));
    assert!(!repo.exists_by_identity("repo-2", "google").await.unwrap());

    assert_eq!(repo.find_by_id(saved.id).await.unwrap().unwrap(), saved);
}
