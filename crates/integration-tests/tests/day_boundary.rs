//! "Today" listings and reports stop at local midnight.
//!
//! Requires `ARGOS_TEST_DATABASE_URL`. Run with `-- --ignored`.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{Local, TimeDelta};
use reqwest::StatusCode;
use serde_json::{Value, json};

use argos_integration_tests::{TestApp, TestClient, expect_status};
use argos_server::clock::{Clock, FixedClock};

/// A clock stopped two local days back, always before today's midnight.
fn two_days_ago() -> Arc<dyn Clock> {
    let then = Local::now() - TimeDelta::days(2);
    Arc::new(FixedClock::new(then.fixed_offset()))
}

async fn post(client: &TestClient, path: &str, body: Value) {
    expect_status(client.post(path, &body).await, StatusCode::CREATED).await;
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_earlier_days_are_excluded() {
    let past = TestApp::spawn_with_clock(two_days_ago()).await;
    let today = TestApp::spawn().await;

    let (worker_then, user) = past.worker().await;
    post(&worker_then, "/sales", json!({"description": "Antes", "amount": 111})).await;
    post(&worker_then, "/expenses", json!({"description": "Antes", "amount": 222})).await;

    let worker_now = today
        .login_existing(user["email"].as_str().unwrap())
        .await;
    post(&worker_now, "/sales", json!({"description": "Hoy", "amount": 5})).await;

    let sales = expect_status(worker_now.get("/sales").await, StatusCode::OK).await;
    assert_eq!(sales["sales"].as_array().unwrap().len(), 1);
    assert_eq!(sales["sales"][0]["amount"], 5.0);
    assert_eq!(sales["total"], 5.0);

    let expenses = expect_status(worker_now.get("/expenses").await, StatusCode::OK).await;
    assert!(expenses["expenses"].as_array().unwrap().is_empty());
    assert_eq!(expenses["total"], 0.0);

    let (manager, _) = today.manager().await;
    let report = expect_status(manager.get("/reports").await, StatusCode::OK).await;
    let mine = |rows: &Value| -> Vec<Value> {
        rows.as_array()
            .unwrap()
            .iter()
            .filter(|row| row["userId"] == user["id"])
            .cloned()
            .collect()
    };
    assert!(mine(&report["expenses"]).is_empty());
    let sales = mine(&report["sales"]);
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0]["amount"], 5.0);

    let row = report["workerSummary"]
        .as_array()
        .unwrap()
        .iter()
        .find(|w| w["userId"] == user["id"])
        .unwrap();
    assert_eq!(row["sales"], 5.0);
    assert_eq!(row["expenses"], 0.0);
    assert_eq!(row["profit"], 5.0);
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_a_fixed_day_ends_at_its_own_now() {
    let past = TestApp::spawn_with_clock(two_days_ago()).await;
    let today = TestApp::spawn().await;

    let (worker_then, user) = past.worker().await;
    post(&worker_then, "/sales", json!({"description": "Antes", "amount": 111})).await;

    // Recorded later, so outside the stopped clock's window
    let worker_now = today
        .login_existing(user["email"].as_str().unwrap())
        .await;
    post(&worker_now, "/sales", json!({"description": "Hoy", "amount": 5})).await;

    let sales = expect_status(worker_then.get("/sales").await, StatusCode::OK).await;
    assert_eq!(sales["sales"].as_array().unwrap().len(), 1);
    assert_eq!(sales["total"], 111.0);
}
