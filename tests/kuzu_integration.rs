//! Integration tests for the embedded Kùzu backend.
//!
//! These tests build and run the real engine.
//! Run with: `cargo test --features integration --test kuzu_integration`

#![cfg(feature = "integration")]

use serde_json::json;
use tempfile::TempDir;

use neokuzu::error::DriverError;
use neokuzu::graph::backends::kuzu::KuzuClient;
use neokuzu::graph::{Params, QueryExt};

/// Opens a client on a fresh database inside a temp directory.
///
/// The directory guard is returned so the database outlives the test body.
async fn fresh_client() -> (TempDir, KuzuClient) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let client = KuzuClient::open(dir.path().join("graph.kuzu"))
        .await
        .expect("Failed to open database");
    (dir, client)
}

async fn create_person_table(client: &KuzuClient) {
    client
        .execute_query(
            "CREATE NODE TABLE Person(name STRING, age INT64, PRIMARY KEY(name))",
            Params::new(),
        )
        .await
        .expect("Failed to create node table");
}

#[tokio::test]
async fn test_fresh_database_trivial_query() {
    let (_dir, client) = fresh_client().await;
    create_person_table(&client).await;

    let (rows, summary, columns) = client
        .execute_query("MATCH (p:Person) RETURN p.name AS name", Params::new())
        .await
        .expect("Query failed");

    assert!(rows.is_empty());
    assert!(summary.is_none());
    assert_eq!(columns, vec!["name"]);
}

#[tokio::test]
async fn test_create_and_query_with_params() {
    let (_dir, client) = fresh_client().await;
    create_person_table(&client).await;

    let mut params = Params::new();
    params.insert("name".to_string(), json!("Alice"));
    params.insert("age".to_string(), json!(42));
    client
        .execute_query(
            "CREATE (:Person {name: $name, age: $age})",
            params,
        )
        .await
        .expect("Failed to create node");

    let mut params = Params::new();
    params.insert("name".to_string(), json!("Alice"));
    let (rows, summary, columns) = client
        .execute_query(
            "MATCH (p:Person) WHERE p.name = $name RETURN p.name AS name, p.age AS age",
            params,
        )
        .await
        .expect("Query failed");

    assert!(summary.is_none());
    assert_eq!(columns, vec!["name", "age"]);
    assert_eq!(rows.len(), 1);
    let name: String = rows[0].get("name").expect("No name column");
    let age: i64 = rows[0].get("age").expect("No age column");
    assert_eq!(name, "Alice");
    assert_eq!(age, 42);
}

#[tokio::test]
async fn test_row_key_set_matches_columns() {
    let (_dir, client) = fresh_client().await;
    create_person_table(&client).await;

    for name in ["a", "b", "c"] {
        let mut params = Params::new();
        params.insert("name".to_string(), json!(name));
        client
            .execute_query("CREATE (:Person {name: $name, age: 1})", params)
            .await
            .expect("Failed to create node");
    }

    let (rows, _, columns) = client
        .execute_query(
            "MATCH (p:Person) RETURN p.name AS name, p.age AS age",
            Params::new(),
        )
        .await
        .expect("Query failed");

    assert_eq!(rows.len(), 3);
    for row in &rows {
        let keys: Vec<_> = row.columns().map(str::to_string).collect();
        assert_eq!(keys, columns);
    }
}

#[tokio::test]
async fn test_reserved_params_have_no_effect() {
    let (_dir, client) = fresh_client().await;
    create_person_table(&client).await;

    let mut params = Params::new();
    params.insert("name".to_string(), json!("Bob"));
    params.insert("age".to_string(), json!(7));
    client
        .execute_query("CREATE (:Person {name: $name, age: $age})", params)
        .await
        .expect("Failed to create node");

    let query = "MATCH (p:Person) WHERE p.name = $name RETURN p.name AS name, p.age AS age";

    let mut plain = Params::new();
    plain.insert("name".to_string(), json!("Bob"));
    let (plain_rows, _, plain_columns) = client
        .execute_query(query, plain)
        .await
        .expect("Query failed");

    let mut with_reserved = Params::new();
    with_reserved.insert("name".to_string(), json!("Bob"));
    with_reserved.insert("database_".to_string(), json!("some-database"));
    with_reserved.insert("routing_".to_string(), json!("w"));
    let (reserved_rows, _, reserved_columns) = client
        .execute_query(query, with_reserved)
        .await
        .expect("Query with reserved params failed");

    assert_eq!(plain_columns, reserved_columns);
    assert_eq!(plain_rows.len(), reserved_rows.len());
    for (a, b) in plain_rows.iter().zip(&reserved_rows) {
        for column in &plain_columns {
            assert_eq!(a.get_raw(column), b.get_raw(column));
        }
    }
}

#[tokio::test]
async fn test_reserved_params_alone_use_parameterless_path() {
    let (_dir, client) = fresh_client().await;
    create_person_table(&client).await;

    // Reserved keys alone reduce to an empty set, which is passed as
    // absent rather than as an empty map.
    let mut params = Params::new();
    params.insert("database_".to_string(), json!("ignored"));
    let (rows, summary, columns) = client
        .execute_query("MATCH (p:Person) RETURN p.name AS name", params)
        .await
        .expect("Query failed");

    assert!(rows.is_empty());
    assert!(summary.is_none());
    assert_eq!(columns, vec!["name"]);
}

#[tokio::test]
async fn test_engine_error_propagates() {
    let (_dir, client) = fresh_client().await;

    let err = client
        .execute_query("MATCH (p:NoSuchTable) RETURN p", Params::new())
        .await
        .expect_err("Query against missing table must fail");

    match err {
        DriverError::Query { query, .. } => {
            assert_eq!(query, "MATCH (p:NoSuchTable) RETURN p");
        }
        other => panic!("expected query error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_engine_error_with_params_propagates() {
    let (_dir, client) = fresh_client().await;

    // Same user mistake as the parameterless case; supplying a parameter
    // must not change which error variant surfaces.
    let mut params = Params::new();
    params.insert("name".to_string(), json!("Alice"));
    let err = client
        .execute_query("MATCH (p:NoSuchTable) WHERE p.name = $name RETURN p", params)
        .await
        .expect_err("Query against missing table must fail");

    match err {
        DriverError::Query { query, .. } => {
            assert_eq!(query, "MATCH (p:NoSuchTable) WHERE p.name = $name RETURN p");
        }
        other => panic!("expected query error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_query_after_close_fails() {
    let (_dir, client) = fresh_client().await;
    create_person_table(&client).await;

    client.close().await.expect("Close failed");

    let err = client
        .execute_query("MATCH (p:Person) RETURN p.name", Params::new())
        .await
        .expect_err("Query after close must fail");
    assert!(matches!(err, DriverError::ConnectionClosed));
}

#[tokio::test]
async fn test_double_close_is_noop() {
    let (_dir, client) = fresh_client().await;

    client.close().await.expect("First close failed");
    client.close().await.expect("Second close must be a no-op");
}

#[tokio::test]
async fn test_builder_surface() {
    let (_dir, client) = fresh_client().await;
    create_person_table(&client).await;

    client
        .query("CREATE (:Person {name: $name, age: $age})")
        .param("name", "Carol")
        .param("age", 30)
        .run()
        .await
        .expect("Failed to create node");

    let row = client
        .query("MATCH (p:Person) WHERE p.name = $name RETURN p.age AS age")
        .param("name", "Carol")
        .fetch_one()
        .await
        .expect("Query failed")
        .expect("Expected a row");

    let age: i64 = row.get("age").expect("No age column");
    assert_eq!(age, 30);
}

#[tokio::test]
async fn test_list_parameter_and_structured_result() {
    let (_dir, client) = fresh_client().await;
    create_person_table(&client).await;

    for (name, age) in [("x", 1), ("y", 2), ("z", 3)] {
        let mut params = Params::new();
        params.insert("name".to_string(), json!(name));
        params.insert("age".to_string(), json!(age));
        client
            .execute_query("CREATE (:Person {name: $name, age: $age})", params)
            .await
            .expect("Failed to create node");
    }

    let (rows, _, columns) = client
        .execute_query(
            "MATCH (p:Person) RETURN collect(p.name) AS names",
            Params::new(),
        )
        .await
        .expect("Query failed");

    assert_eq!(columns, vec!["names"]);
    assert_eq!(rows.len(), 1);
    let mut names: Vec<String> = rows[0].get("names").expect("No names column");
    names.sort();
    assert_eq!(names, vec!["x", "y", "z"]);
}
