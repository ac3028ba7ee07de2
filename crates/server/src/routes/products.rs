//! Product catalog route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use argos_core::{Money, ProductId};

use super::{ApiOk, ok};
use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::extract::{JsonBody, PathParam, non_blank};
use crate::middleware::RequireManager;
use crate::models::{NewProduct, Product, ProductPatch};
use crate::state::AppState;

/// Body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<Money>,
}

/// Body for a partial product update. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub active: Option<bool>,
}

impl UpdateProductRequest {
    fn into_patch(self) -> ProductPatch {
        ProductPatch {
            // an empty name is ignored rather than blanking the product
            name: non_blank(self.name.as_deref()).map(str::to_owned),
            price: self.price,
            active: self.active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductPayload {
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct ProductsPayload {
    pub products: Vec<Product>,
}

/// GET /products
///
/// Public. Active products only, ordered by name.
pub async fn index(State(state): State<AppState>) -> Result<Json<ApiOk<ProductsPayload>>> {
    let products = ProductRepository::new(state.pool()).list_active().await?;
    Ok(ok(ProductsPayload { products }))
}

/// POST /products
pub async fn create(
    State(state): State<AppState>,
    RequireManager(manager): RequireManager,
    JsonBody(body): JsonBody<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiOk<ProductPayload>>)> {
    let (Some(name), Some(price)) = (non_blank(body.name.as_deref()), body.price) else {
        return Err(AppError::bad_request("Name and price are required"));
    };

    let product = ProductRepository::new(state.pool())
        .create(&NewProduct { name, price })
        .await?;

    tracing::info!(product_id = %product.id, manager_id = %manager.id, "product created");
    Ok((StatusCode::CREATED, ok(ProductPayload { product })))
}

/// PATCH /products/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireManager(manager): RequireManager,
    PathParam(id): PathParam<ProductId>,
    JsonBody(body): JsonBody<UpdateProductRequest>,
) -> Result<Json<ApiOk<ProductPayload>>> {
    let product = ProductRepository::new(state.pool())
        .update(id, &body.into_patch())
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    tracing::info!(product_id = %product.id, manager_id = %manager.id, "product updated");
    Ok(ok(ProductPayload { product }))
}
