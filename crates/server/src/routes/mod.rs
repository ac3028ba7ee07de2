//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST  /auth/register          - Create an account (role defaults to WORKER)
//! POST  /auth/login             - Start a session
//! POST  /auth/logout            - End the session
//! GET   /auth/me                - Current user
//!
//! # Catalog
//! GET   /products               - Active products by name
//! POST  /products               - Create product (MANAGER)
//! PATCH /products/{id}          - Partial update (MANAGER)
//!
//! # Shifts (WORKER)
//! GET   /shifts                 - Open shift or null
//! POST  /shifts                 - Open a shift
//! PATCH /shifts/{id}/close      - Close own shift, with summary
//!
//! # Ledger (any session)
//! GET   /sales                  - Today's own sales and total
//! POST  /sales                  - Record a sale
//! GET   /expenses               - Today's own expenses and total
//! POST  /expenses               - Record an expense
//!
//! # Management (MANAGER)
//! GET   /reports                - Today's report across workers
//! GET   /adjustments            - Audit trail, optionally filtered
//! POST  /adjustments            - File a reversal or correction
//! ```
//!
//! Every success body is a JSON object with `"ok": true` next to the payload
//! fields.

pub mod adjustments;
pub mod auth;
pub mod expenses;
pub mod products;
pub mod reports;
pub mod sales;
pub mod shifts;

use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Success envelope: `{"ok": true, ...payload}`.
#[derive(Debug, Serialize)]
pub struct ApiOk<T> {
    ok: bool,
    #[serde(flatten)]
    payload: T,
}

/// Wrap a payload in the success envelope.
pub const fn ok<T>(payload: T) -> Json<ApiOk<T>> {
    Json(ApiOk { ok: true, payload })
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/{id}", patch(products::update))
}

/// Create the shift routes router.
pub fn shift_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shifts::current).post(shifts::open))
        .route("/{id}/close", patch(shifts::close))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .nest("/shifts", shift_routes())
        .route("/sales", get(sales::index).post(sales::create))
        .route("/expenses", get(expenses::index).post(expenses::create))
        .route("/reports", get(reports::daily))
        .route(
            "/adjustments",
            get(adjustments::index).post(adjustments::create),
        )
}
