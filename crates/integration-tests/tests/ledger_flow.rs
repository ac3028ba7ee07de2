//! Catalog, sales, expenses, reports and adjustments over HTTP.
//!
//! Requires `ARGOS_TEST_DATABASE_URL`. Run with `-- --ignored`.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use argos_integration_tests::{TestApp, TestClient, expect_status};

async fn create_product(manager: &TestClient, name: &str, price: f64) -> Value {
    let body = expect_status(
        manager
            .post("/products", &json!({"name": name, "price": price}))
            .await,
        StatusCode::CREATED,
    )
    .await;
    body["product"].clone()
}

async fn record_sale(client: &TestClient, amount: f64) -> Value {
    let body = expect_status(
        client
            .post("/sales", &json!({"description": "Venta", "amount": amount}))
            .await,
        StatusCode::CREATED,
    )
    .await;
    body["sale"].clone()
}

async fn record_expense(client: &TestClient, amount: f64) -> Value {
    let body = expect_status(
        client
            .post("/expenses", &json!({"description": "Gasto", "amount": amount}))
            .await,
        StatusCode::CREATED,
    )
    .await;
    body["expense"].clone()
}

fn rows_by(rows: &Value, user_id: &Value) -> usize {
    rows.as_array()
        .unwrap()
        .iter()
        .filter(|row| row["userId"] == *user_id)
        .count()
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_product_catalog() {
    let app = TestApp::spawn().await;
    let (manager, _) = app.manager().await;

    expect_status(
        manager.post("/products", &json!({"name": "Sin precio"})).await,
        StatusCode::BAD_REQUEST,
    )
    .await;

    let product = create_product(&manager, "Empanada de pino", 2500.0).await;
    let id = product["id"].as_i64().unwrap();
    assert_eq!(product["active"], true);

    let listed = expect_status(app.client().get("/products").await, StatusCode::OK).await;
    assert!(listed["products"].as_array().unwrap().iter().any(|p| p["id"] == id));

    // Blank name is ignored, other fields apply
    let patched = expect_status(
        manager
            .patch(
                &format!("/products/{id}"),
                &json!({"name": "", "price": 2800, "active": false}),
            )
            .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(patched["product"]["name"], "Empanada de pino");
    assert_eq!(patched["product"]["price"], 2800.0);
    assert_eq!(patched["product"]["active"], false);

    let listed = expect_status(app.client().get("/products").await, StatusCode::OK).await;
    assert!(!listed["products"].as_array().unwrap().iter().any(|p| p["id"] == id));

    let missing = expect_status(
        manager
            .patch(&format!("/products/{}", i32::MAX), &json!({"price": 1}))
            .await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(missing["error"], "Product not found");
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_sale_rules() {
    let app = TestApp::spawn().await;
    let (manager, _) = app.manager().await;
    let (worker, _) = app.worker().await;

    let product = create_product(&manager, "Café", 10.0).await;
    let product_id = product["id"].as_i64().unwrap();

    // Product price wins over the client amount
    let sale = expect_status(
        worker
            .post(
                "/sales",
                &json!({"description": "Café", "amount": 999, "productId": product_id}),
            )
            .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(sale["sale"]["amount"], 10.0);
    assert_eq!(sale["sale"]["productId"], product_id);

    // Zero is a valid sale, null is not
    assert_eq!(record_sale(&worker, 0.0).await["amount"], 0.0);
    let missing = expect_status(
        worker
            .post("/sales", &json!({"description": "Nada", "amount": null}))
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(missing["error"], "Description and amount are required");

    // Inactive products cannot be sold
    manager
        .patch(&format!("/products/{product_id}"), &json!({"active": false}))
        .await;
    expect_status(
        worker
            .post(
                "/sales",
                &json!({"description": "Café", "amount": 10, "productId": product_id}),
            )
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_expense_rules() {
    let app = TestApp::spawn().await;
    let (worker, _) = app.worker().await;

    let expense = record_expense(&worker, 4500.0).await;
    assert_eq!(expense["category"], "Otros");

    let categorized = expect_status(
        worker
            .post(
                "/expenses",
                &json!({"description": "Gas", "amount": "12000", "category": "Insumos"}),
            )
            .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(categorized["expense"]["category"], "Insumos");
    assert_eq!(categorized["expense"]["amount"], 12000.0);

    expect_status(
        worker
            .post("/expenses", &json!({"description": "Cero", "amount": 0}))
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_today_listings_are_private() {
    let app = TestApp::spawn().await;
    let (alice, _) = app.worker().await;
    let (bob, bob_user) = app.worker().await;

    record_sale(&alice, 100.0).await;
    record_sale(&bob, 7.0).await;
    record_sale(&bob, 3.0).await;
    record_expense(&bob, 4.0).await;

    let sales = expect_status(bob.get("/sales").await, StatusCode::OK).await;
    let rows = sales["sales"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["userId"] == bob_user["id"]));
    assert_eq!(sales["total"], 10.0);

    let expenses = expect_status(bob.get("/expenses").await, StatusCode::OK).await;
    assert_eq!(expenses["expenses"].as_array().unwrap().len(), 1);
    assert_eq!(expenses["total"], 4.0);
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_daily_report() {
    let app = TestApp::spawn().await;
    let (manager, _) = app.manager().await;
    let (ana, ana_user) = app.worker().await;
    let (luis, luis_user) = app.worker().await;

    record_expense(&ana, 30.0).await;
    record_sale(&ana, 100.0).await;
    record_sale(&luis, 20.0).await;

    let report = expect_status(manager.get("/reports").await, StatusCode::OK).await;

    assert!(report["date"].as_str().unwrap().len() == 10);
    let summary = &report["summary"];
    let net = summary["totalSales"].as_f64().unwrap() - summary["totalExpenses"].as_f64().unwrap();
    assert!((summary["netProfit"].as_f64().unwrap() - net).abs() < 1e-6);

    assert_eq!(rows_by(&report["expenses"], &ana_user["id"]), 1);
    assert_eq!(rows_by(&report["sales"], &ana_user["id"]), 1);
    assert_eq!(rows_by(&report["sales"], &luis_user["id"]), 1);
    assert!(report["sales"][0]["user"]["email"].is_string());

    let workers = report["workerSummary"].as_array().unwrap();
    let ana_row = workers.iter().find(|w| w["userId"] == ana_user["id"]).unwrap();
    assert_eq!(ana_row["expenses"], 30.0);
    assert_eq!(ana_row["sales"], 100.0);
    assert_eq!(ana_row["profit"], 70.0);

    let luis_row = workers.iter().find(|w| w["userId"] == luis_user["id"]).unwrap();
    assert_eq!(luis_row["expenses"], 0.0);
    assert_eq!(luis_row["profit"], 20.0);
    assert_eq!(luis_row["email"], luis_user["email"]);
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_adjustments() {
    let app = TestApp::spawn().await;
    let (manager, manager_user) = app.manager().await;
    let (worker, _) = app.worker().await;

    let fifty = record_sale(&worker, 50.0).await;
    let hundred = record_expense(&worker, 100.0).await;

    // Reversal ignores the delta
    let reversal = expect_status(
        manager
            .post(
                "/adjustments",
                &json!({
                    "type": "reversal",
                    "reason": "Cliente devolvió",
                    "targetId": fifty["id"],
                    "targetType": "SALE",
                    "adjustmentAmount": -999,
                }),
            )
            .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(reversal["adjustment"]["type"], "reversal");
    assert_eq!(reversal["adjustment"]["originalAmount"], 50.0);
    assert_eq!(reversal["adjustment"]["newAmount"], 0.0);
    assert_eq!(reversal["message"], "Reversal recorded. Original: $50, New: $0");

    let correction = expect_status(
        manager
            .post(
                "/adjustments",
                &json!({
                    "type": "correction",
                    "reason": "Mal digitado",
                    "targetId": hundred["id"],
                    "targetType": "EXPENSE",
                    "adjustmentAmount": -30,
                }),
            )
            .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(correction["adjustment"]["newAmount"], 70.0);
    assert_eq!(correction["adjustment"]["adjustmentAmount"], -30.0);

    // Omitted delta is a no-op correction
    let noop = expect_status(
        manager
            .post(
                "/adjustments",
                &json!({
                    "type": "correction",
                    "reason": "Revisado",
                    "targetId": hundred["id"],
                    "targetType": "EXPENSE",
                }),
            )
            .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(noop["adjustment"]["newAmount"], 100.0);

    // The targets are untouched
    let expenses = expect_status(worker.get("/expenses").await, StatusCode::OK).await;
    assert_eq!(expenses["expenses"][0]["amount"], 100.0);

    let listed = expect_status(
        manager
            .get(&format!("/adjustments?targetType=EXPENSE&targetId={}", hundred["id"]))
            .await,
        StatusCode::OK,
    )
    .await;
    let rows = listed["adjustments"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // newest first
    assert_eq!(rows[0]["reason"], "Revisado");
    assert_eq!(rows[0]["user"]["id"], manager_user["id"]);
    assert_eq!(rows[0]["user"]["email"], manager_user["email"]);

    expect_status(
        manager.get("/adjustments?targetType=ORDER").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_adjustment_validation() {
    let app = TestApp::spawn().await;
    let (manager, _) = app.manager().await;

    let missing = expect_status(
        manager
            .post("/adjustments", &json!({"type": "reversal", "targetId": 1}))
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(
        missing["error"],
        "type, reason, targetId, and targetType are required"
    );

    let bad_target = expect_status(
        manager
            .post(
                "/adjustments",
                &json!({"type": "reversal", "reason": "x", "targetId": 1, "targetType": "ORDER"}),
            )
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(bad_target["error"], "targetType must be SALE or EXPENSE");

    let bad_type = expect_status(
        manager
            .post(
                "/adjustments",
                &json!({"type": "refund", "reason": "x", "targetId": 1, "targetType": "SALE"}),
            )
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(bad_type["error"], "type must be reversal or correction");

    let unknown = expect_status(
        manager
            .post(
                "/adjustments",
                &json!({"type": "reversal", "reason": "x", "targetId": i32::MAX, "targetType": "SALE"}),
            )
            .await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(unknown["error"], "SALE not found");
}

#[tokio::test]
#[ignore = "requires ARGOS_TEST_DATABASE_URL"]
async fn test_oversized_amounts_are_rejected() {
    let app = TestApp::spawn().await;
    let (manager, _) = app.manager().await;
    let (worker, _) = app.worker().await;

    for amount in [json!(7e28), json!("79228162514264337593543950335"), json!(1e16)] {
        expect_status(
            worker
                .post("/sales", &json!({"description": "Enorme", "amount": amount}))
                .await,
            StatusCode::BAD_REQUEST,
        )
        .await;
        expect_status(
            worker
                .post("/expenses", &json!({"description": "Enorme", "amount": amount}))
                .await,
            StatusCode::BAD_REQUEST,
        )
        .await;
    }

    // Nothing was stored, so the listings still load
    let sales = expect_status(worker.get("/sales").await, StatusCode::OK).await;
    assert_eq!(sales["total"], 0.0);
    expect_status(manager.get("/reports").await, StatusCode::OK).await;

    let target = record_sale(&worker, 10.0).await;
    expect_status(
        manager
            .post(
                "/adjustments",
                &json!({
                    "type": "correction",
                    "reason": "Enorme",
                    "targetId": target["id"],
                    "targetType": "SALE",
                    "adjustmentAmount": 7e28,
                }),
            )
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
}
