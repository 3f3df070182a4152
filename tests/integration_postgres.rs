//! Runs against a real database. Requires `DATABASE_URL`; run with
//! `cargo test -- --ignored`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{MockPasswordStrategy, generate_unique_email};
use sqlx::PgPool;
use userbase::modules::users::model::{CreateUserDto, UpdateUserDto};
use userbase::modules::users::{PgUserStore, UserService};
use userbase_core::{ListOptions, ListOptionsQuery};
use uuid::Uuid;

fn service(pool: PgPool) -> UserService {
    UserService::new(
        Arc::new(PgUserStore::new(pool)),
        Arc::new(MockPasswordStrategy),
    )
}

fn create_dto(first: &str, last: &str, email: &str) -> CreateUserDto {
    CreateUserDto {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        email: email.to_string(),
        password: "12345678".to_string(),
    }
}

async fn stored_hash(pool: &PgPool, id: Uuid) -> String {
    sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_get(pool: PgPool) {
    let service = service(pool.clone());
    let email = generate_unique_email();

    let created = service.create(create_dto("Ada", "Lovelace", &email)).await.unwrap();
    assert_eq!(created.password_hash, "12345678-hashed");
    assert_eq!(stored_hash(&pool, created.id).await, "12345678-hashed");

    let user = service.get_one(created.id).await.unwrap().unwrap();
    assert_eq!(user.email, email);
    assert_eq!(user.first_name.as_deref(), Some("Ada"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_email_is_bad_request(pool: PgPool) {
    let service = service(pool);
    let email = generate_unique_email();
    service.create(create_dto("A", "B", &email)).await.unwrap();

    let err = service.create(create_dto("C", "D", &email)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_sort_filter_paginate(pool: PgPool) {
    let service = service(pool);
    for (first, last, email) in [
        ("Carol", "Doe", "carol@test.com"),
        ("Alice", "Smith", "alice@test.com"),
        ("Bob", "Doe", "bob@test.com"),
    ] {
        service.create(create_dto(first, last, email)).await.unwrap();
    }

    let options = ListOptions::from(ListOptionsQuery {
        p: Some("2".to_string()),
        l: Some("1".to_string()),
        o: Some("firstName".to_string()),
        f: Some("lastName:Doe".to_string()),
    });
    let users = service.get_list(&options).await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "carol@test.com");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_keeps_hash_without_password(pool: PgPool) {
    let service = service(pool.clone());
    let created = service
        .create(create_dto("A", "B", &generate_unique_email()))
        .await
        .unwrap();
    let new_email = generate_unique_email();

    let updated = service
        .update(
            created.id,
            UpdateUserDto {
                first_name: None,
                last_name: Some("Z".to_string()),
                email: new_email.clone(),
                password: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.email, new_email);
    assert_eq!(updated.first_name, None);
    assert_eq!(stored_hash(&pool, created.id).await, created.password_hash);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_and_missing(pool: PgPool) {
    let service = service(pool);
    let created = service
        .create(create_dto("A", "B", &generate_unique_email()))
        .await
        .unwrap();

    assert!(service.delete(created.id).await.unwrap());
    assert!(!service.delete(created.id).await.unwrap());
    assert_eq!(service.get_one(created.id).await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_text_sort_is_bytewise(pool: PgPool) {
    let service = service(pool);
    service.create(create_dto("alice", "X", "lower@test.com")).await.unwrap();
    service.create(create_dto("Bob", "X", "upper@test.com")).await.unwrap();

    let options = ListOptions::from(ListOptionsQuery {
        o: Some("firstName".to_string()),
        ..Default::default()
    });
    let users = service.get_list(&options).await.unwrap();

    let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["upper@test.com", "lower@test.com"]);
}
