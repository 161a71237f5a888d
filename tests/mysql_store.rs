//! Round trip against a live MySQL configured through the service's environment
//! variables. Run with `cargo test -- --ignored` once `user` exists:
//!
//! ```sql
//! CREATE TABLE user (id VARCHAR(26) PRIMARY KEY, name VARCHAR(50), age INT);
//! ```

use sqlx::mysql::MySqlPoolOptions;
use user_service::{id, AppError, CreateUser, MySqlStore, ServiceConfig, UserService, UserStore};

async fn open() -> MySqlStore {
    dotenvy::dotenv().ok();
    let config = ServiceConfig::from_env().expect("MYSQL_* and PORT must be set");
    MySqlStore::open(&config.datastore).await.expect("datastore reachable")
}

#[tokio::test]
#[ignore = "requires a running MySQL"]
async fn create_then_find_by_name() {
    let store = open().await;
    let name = format!("it-{}", id::generate().unwrap());

    let id = UserService::create(
        &store,
        CreateUser {
            name: name.clone(),
            age: 42,
        },
    )
    .await
    .unwrap();

    let users = UserService::find_by_name(&store, &name).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, id.to_string());
    assert_eq!(users[0].age, 42);

    store.close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MySQL"]
async fn failed_insert_rolls_back() {
    let store = open().await;
    let name = format!("it-{}", id::generate().unwrap());
    let user = user_service::NewUser {
        id: id::generate().unwrap(),
        name: name.clone(),
        age: 30,
    };

    store.insert(&user).await.unwrap();
    // Same primary key: the exec fails and the transaction is rolled back.
    assert!(store.insert(&user).await.is_err());

    let users = store.find_by_name(&name).await.unwrap();
    assert_eq!(users.len(), 1);

    store.close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MySQL"]
async fn undecodable_row_fails_the_whole_read() {
    dotenvy::dotenv().ok();
    let config = ServiceConfig::from_env().expect("MYSQL_* and PORT must be set");
    // One connection, so the session-scoped table below shadows `user` for every query.
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect_with(config.datastore.connect_options())
        .await
        .expect("datastore reachable");
    let store = MySqlStore::from_pool(pool);

    sqlx::query("CREATE TEMPORARY TABLE user (id VARCHAR(26) PRIMARY KEY, name VARCHAR(50), age VARCHAR(10))")
        .execute(store.pool())
        .await
        .unwrap();
    sqlx::query("INSERT INTO user (id, name, age) VALUES (?, 'Old', '30'), (?, 'Old', 'ancient')")
        .bind(id::generate().unwrap().to_string())
        .bind(id::generate().unwrap().to_string())
        .execute(store.pool())
        .await
        .unwrap();

    let err = store.find_by_name("Old").await.unwrap_err();
    assert!(matches!(err, AppError::Db(_)), "unexpected {err:?}");

    store.close().await.unwrap();
}
