//! Shift lifecycle over HTTP.
//!
//! Requires `ARGOS_TEST_DATABASE_URL`. Run with `-- --ignored`.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::{Value, json};

use argos_integration_tests::{TestApp, expect_status};

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_open_record_close() {
    let app = TestApp::spawn().await;
    let (worker, user) = app.worker().await;

    let none = expect_status(worker.get("/shifts").await, StatusCode::OK).await;
    assert_eq!(none["shift"], Value::Null);

    let opened = expect_status(worker.post("/shifts", &json!({})).await, StatusCode::CREATED).await;
    let shift_id = opened["shift"]["id"].as_i64().unwrap();
    assert_eq!(opened["shift"]["closed"], false);
    assert_eq!(opened["shift"]["userId"], user["id"]);
    assert_eq!(opened["shift"]["endTime"], Value::Null);

    let body = expect_status(worker.post("/shifts", &json!({})).await, StatusCode::CONFLICT).await;
    assert_eq!(body["error"], "You already have an active shift");

    let current = expect_status(worker.get("/shifts").await, StatusCode::OK).await;
    assert_eq!(current["shift"]["id"], shift_id);

    for amount in [10, 10, 35] {
        expect_status(
            worker
                .post(
                    "/sales",
                    &json!({"description": "Café", "amount": amount, "shiftId": shift_id}),
                )
                .await,
            StatusCode::CREATED,
        )
        .await;
    }
    expect_status(
        worker
            .post(
                "/expenses",
                &json!({"description": "Leche", "amount": 20, "shiftId": shift_id}),
            )
            .await,
        StatusCode::CREATED,
    )
    .await;

    let closed = expect_status(
        worker
            .patch(&format!("/shifts/{shift_id}/close"), &json!({}))
            .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(closed["ok"], true);
    assert_eq!(closed["shift"]["closed"], true);
    assert!(closed["shift"]["endTime"].is_string());
    assert_eq!(closed["shift"]["sales"].as_array().unwrap().len(), 3);
    assert_eq!(closed["shift"]["expenses"].as_array().unwrap().len(), 1);
    assert_eq!(closed["summary"]["totalSales"], 55.0);
    assert_eq!(closed["summary"]["totalExpenses"], 20.0);
    assert_eq!(closed["summary"]["profit"], 35.0);
    assert_eq!(closed["summary"]["transactionCount"], 4);

    // Closing is final and never moves endTime
    let again = expect_status(
        worker
            .patch(&format!("/shifts/{shift_id}/close"), &json!({}))
            .await,
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(again["error"], "Shift is already closed");

    let stored: DateTime<Utc> =
        sqlx::query_scalar("SELECT end_time FROM argos.shift WHERE id = $1")
            .bind(i32::try_from(shift_id).unwrap())
            .fetch_one(&app.pool)
            .await
            .unwrap();
    let returned = DateTime::parse_from_rfc3339(closed["shift"]["endTime"].as_str().unwrap()).unwrap();
    assert_eq!(stored, returned);

    let none = expect_status(worker.get("/shifts").await, StatusCode::OK).await;
    assert_eq!(none["shift"], Value::Null);

    // A closed shift no longer accepts rows
    expect_status(
        worker
            .post(
                "/sales",
                &json!({"description": "Tarde", "amount": 5, "shiftId": shift_id}),
            )
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;

    // And a new one can be opened
    expect_status(worker.post("/shifts", &json!({})).await, StatusCode::CREATED).await;
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_cannot_close_or_use_someone_elses_shift() {
    let app = TestApp::spawn().await;
    let (owner, _) = app.worker().await;
    let (other, _) = app.worker().await;

    let opened = expect_status(owner.post("/shifts", &json!({})).await, StatusCode::CREATED).await;
    let shift_id = opened["shift"]["id"].as_i64().unwrap();

    let body = expect_status(
        other
            .patch(&format!("/shifts/{shift_id}/close"), &json!({}))
            .await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(body["error"], "You can only close your own shifts");

    expect_status(
        other
            .post(
                "/sales",
                &json!({"description": "Ajeno", "amount": 1, "shiftId": shift_id}),
            )
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_close_missing_shift() {
    let app = TestApp::spawn().await;
    let (worker, _) = app.worker().await;

    let body = expect_status(
        worker
            .patch(&format!("/shifts/{}/close", i32::MAX), &json!({}))
            .await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(body["error"], "Shift not found");
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_concurrent_opens_yield_one_shift() {
    let app = TestApp::spawn().await;
    let (worker, _) = app.worker().await;

    let body_a = json!({});
    let body_b = json!({});
    let (a, b) = tokio::join!(
        worker.post("/shifts", &body_a),
        worker.post("/shifts", &body_b)
    );
    let mut statuses = [a.status(), b.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_close_summary_counts_every_accepted_sale() {
    let app = TestApp::spawn().await;
    let (worker, _) = app.worker().await;

    let opened = expect_status(worker.post("/shifts", &json!({})).await, StatusCode::CREATED).await;
    let shift_id = opened["shift"]["id"].as_i64().unwrap();
    let sale = json!({"description": "Carrera", "amount": 1, "shiftId": shift_id});
    let close_path = format!("/shifts/{shift_id}/close");

    let close_body = json!({});
    let (close, a, b, c, d) = tokio::join!(
        worker.patch(&close_path, &close_body),
        worker.post("/sales", &sale),
        worker.post("/sales", &sale),
        worker.post("/sales", &sale),
        worker.post("/sales", &sale),
    );

    let mut accepted = 0;
    for response in [a, b, c, d] {
        match response.status() {
            StatusCode::CREATED => accepted += 1,
            status => assert_eq!(status, StatusCode::BAD_REQUEST),
        }
    }

    let closed = expect_status(close, StatusCode::OK).await;
    assert_eq!(closed["shift"]["sales"].as_array().unwrap().len(), accepted);
    assert_eq!(closed["summary"]["transactionCount"], accepted);
}
