// tests/feedback_tests.rs

use mindscreen::{config::Config, db, routes, state::AppState};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::collections::HashMap;

async fn spawn_app() -> (String, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite for testing");

    db::init_schema(&pool)
        .await
        .expect("Failed to initialize the survey schema");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        public_base_url: "http://feedback.test".parse().unwrap(),
        listen_addr: "127.0.0.1:0".to_string(),
        rust_log: "error".to_string(),
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };
    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

/// Submits a survey for `student_id` where every form item holds `rating`,
/// except the overrides applied on top.
async fn submit_uniform(
    client: &reqwest::Client,
    address: &str,
    student_id: &str,
    rating: u8,
    overrides: &[(u8, Option<u8>)],
) {
    let mut answers: HashMap<u8, u8> = (6..=95).map(|item| (item, rating)).collect();
    for &(item, value) in overrides {
        match value {
            Some(value) => answers.insert(item, value),
            None => answers.remove(&item),
        };
    }

    let response = client
        .post(format!("{}/api/surveys", address))
        .json(&serde_json::json!({
            "name": "Zhang Wei",
            "age": 19,
            "gender": "male",
            "class": "EE-2023-1",
            "student_id": student_id,
            "answers": answers
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);
}

async fn fetch_feedback(
    client: &reqwest::Client,
    address: &str,
    student_id: &str,
) -> reqwest::Response {
    client
        .get(format!("{}/api/feedback", address))
        .query(&[("student_id", student_id)])
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn feedback_echoes_identity_and_assessment() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    submit_uniform(&client, &address, "20240101", 3, &[]).await;

    // Act
    let response = fetch_feedback(&client, &address, "20240101").await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON");
    assert_eq!(body["student_id"], serde_json::json!("20240101"));
    assert_eq!(body["name"], serde_json::json!("Zhang Wei"));
    assert_eq!(body["age"], serde_json::json!(19));
    assert_eq!(body["gender"], serde_json::json!("male"));
    assert_eq!(body["class"], serde_json::json!("EE-2023-1"));
    assert!(body["submitted_at"].is_string());

    // 89 scored items at 3 each; the honesty item does not count.
    assert_eq!(body["assessment"]["total"], serde_json::json!(267));
    assert_eq!(body["assessment"]["average"], serde_json::json!(3.0));
    assert_eq!(body["assessment"]["tier"], serde_json::json!("mild_distress"));
    assert!(!body["assessment"]["guidance"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn all_never_classifies_healthy() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    submit_uniform(&client, &address, "20240102", 1, &[]).await;

    // Act
    let response = fetch_feedback(&client, &address, "20240102").await;

    // Assert
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["assessment"]["total"], serde_json::json!(89));
    assert_eq!(body["assessment"]["average"], serde_json::json!(1.0));
    assert_eq!(body["assessment"]["tier"], serde_json::json!("healthy"));
}

#[tokio::test]
async fn all_always_classifies_significant() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    submit_uniform(&client, &address, "20240103", 5, &[]).await;

    // Act
    let response = fetch_feedback(&client, &address, "20240103").await;

    // Assert
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["assessment"]["total"], serde_json::json!(445));
    assert_eq!(body["assessment"]["average"], serde_json::json!(5.0));
    assert_eq!(
        body["assessment"]["tier"],
        serde_json::json!("significant_distress")
    );
}

#[tokio::test]
async fn honesty_item_is_excluded_from_the_total() {
    // Arrange: all 1s, but the honesty item maxed out
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    submit_uniform(&client, &address, "20240104", 1, &[(41, Some(5))]).await;

    // Act
    let response = fetch_feedback(&client, &address, "20240104").await;

    // Assert: total unchanged by item 41
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["assessment"]["total"], serde_json::json!(89));
    assert_eq!(body["assessment"]["tier"], serde_json::json!("healthy"));
}

#[tokio::test]
async fn omitted_items_default_to_never() {
    // Arrange: items 6 and 7 left unanswered, everything else at 3.
    // 87 items at 3 plus 2 defaults at 1: total 263.
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    submit_uniform(&client, &address, "20240105", 3, &[(6, None), (7, None)]).await;

    // Act
    let response = fetch_feedback(&client, &address, "20240105").await;

    // Assert
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["assessment"]["total"], serde_json::json!(263));

    let average = body["assessment"]["average"].as_f64().unwrap();
    assert!((average - 263.0 / 89.0).abs() < 1e-9);
    assert_eq!(body["assessment"]["tier"], serde_json::json!("mild_distress"));
}

#[tokio::test]
async fn resubmission_changes_the_served_assessment() {
    // Arrange
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    submit_uniform(&client, &address, "20240106", 1, &[]).await;
    submit_uniform(&client, &address, "20240106", 5, &[]).await;

    // Act
    let response = fetch_feedback(&client, &address, "20240106").await;

    // Assert: the later submission wins, and only one row exists
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["assessment"]["tier"],
        serde_json::json!("significant_distress")
    );

    let stored = db::count_responses(&pool).await.unwrap();
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn feedback_unknown_student_is_404() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = fetch_feedback(&client, &address, "nobody-here").await;

    // Assert
    assert_eq!(response.status().as_u16(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("No survey response found")
    );
}

#[tokio::test]
async fn feedback_blank_student_id_is_400() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = fetch_feedback(&client, &address, "   ").await;

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn feedback_missing_student_id_is_400() {
    // Arrange
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: no query string at all
    let response = client
        .get(format!("{}/api/feedback", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn submitted_feedback_link_resolves_on_this_host() {
    // Arrange: submit, then follow the returned link's query against the
    // test server (the link itself points at the public base URL).
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/surveys", address))
        .json(&serde_json::json!({
            "name": "Zhang Wei",
            "age": 19,
            "gender": "male",
            "class": "EE-2023-1",
            "student_id": "2024 0107",
            "answers": (6..=95).map(|item| (item, 2)).collect::<HashMap<u8, u8>>()
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    let feedback_url = body["feedback_url"].as_str().unwrap();
    let query = feedback_url.split('?').nth(1).expect("link carries a query");

    // Act
    let response = client
        .get(format!("{}/api/feedback?{}", address, query))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert: the percent-encoded id round-trips to the stored row
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["student_id"], serde_json::json!("2024 0107"));
    // 89 items at 2: exactly the lower bound of the mild tier.
    assert_eq!(body["assessment"]["average"], serde_json::json!(2.0));
    assert_eq!(body["assessment"]["tier"], serde_json::json!("mild_distress"));
}
