//! Sales route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use argos_core::{Money, ProductId, ShiftId};

use super::shifts::INVALID_SHIFT;
use super::{ApiOk, ok};
use crate::db::{ProductRepository, SaleRepository};
use crate::error::{AppError, Result};
use crate::extract::{JsonBody, non_blank};
use crate::middleware::AuthUser;
use crate::models::{NewSale, Sale};
use crate::state::AppState;

/// Body for recording a sale.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub product_id: Option<ProductId>,
    pub shift_id: Option<ShiftId>,
}

#[derive(Debug, Serialize)]
pub struct SalePayload {
    pub sale: Sale,
}

#[derive(Debug, Serialize)]
pub struct SalesPayload {
    pub sales: Vec<Sale>,
    pub total: Money,
}

/// GET /sales
///
/// The caller's sales since local midnight, newest first.
pub async fn index(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiOk<SalesPayload>>> {
    let today = state.clock().day_window();
    let sales = SaleRepository::new(state.pool())
        .list_for_user_between(user.id, today.from, today.to)
        .await?;
    let total = sales.iter().map(|s| s.amount).sum();

    Ok(ok(SalesPayload { sales, total }))
}

/// POST /sales
///
/// A zero amount is a valid sale. With a `productId` the product's current
/// price replaces the amount sent by the client.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(body): JsonBody<CreateSaleRequest>,
) -> Result<(StatusCode, Json<ApiOk<SalePayload>>)> {
    let (Some(description), Some(mut amount)) = (non_blank(body.description.as_deref()), body.amount)
    else {
        return Err(AppError::bad_request("Description and amount are required"));
    };

    if let Some(product_id) = body.product_id {
        let product = ProductRepository::new(state.pool())
            .get(product_id)
            .await?
            .filter(|p| p.active)
            .ok_or_else(|| AppError::bad_request("Invalid or inactive product"))?;
        amount = product.price;
    }

    let sale = SaleRepository::new(state.pool())
        .create(&NewSale {
            description,
            amount,
            date: state.clock().now(),
            user_id: user.id,
            product_id: body.product_id,
            shift_id: body.shift_id,
        })
        .await?
        .ok_or_else(|| AppError::bad_request(INVALID_SHIFT))?;

    tracing::info!(sale_id = %sale.id, user_id = %user.id, amount = %sale.amount, "sale recorded");
    Ok((StatusCode::CREATED, ok(SalePayload { sale })))
}
