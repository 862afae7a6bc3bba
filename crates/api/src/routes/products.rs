//! Product inventory handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use warung_core::ProductCode;

use crate::error::{ApiJson, AppError, Result};
use crate::middleware::{RequireAdmin, RequireAuth, RequireRole};
use crate::models::{CreateProductRequest, Product, ProductPatch, UpdateProductRequest};
use crate::state::AppState;

fn not_found(code: &ProductCode) -> AppError {
    AppError::NotFound(format!("product {code}"))
}

/// `GET /produk`
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.products().list().await?))
}

/// `GET /produk/{kd_produk}`
pub async fn show(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Product>> {
    let code = ProductCode::parse(&code)?;
    state
        .products()
        .get(&code)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&code))
}

/// `POST /produk` (any authenticated role)
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    ApiJson(body): ApiJson<CreateProductRequest>,
) -> Result<impl IntoResponse> {
    let product = Product::try_from(body)?;
    let created = state.products().create(&product).await?;

    tracing::info!(
        code = %created.code,
        account_id = %claims.user.id,
        "product created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /produk/{kd_produk}` (admin only)
pub async fn update(
    State(state): State<AppState>,
    RequireRole(claims, _): RequireAdmin,
    Path(code): Path<String>,
    ApiJson(body): ApiJson<UpdateProductRequest>,
) -> Result<Json<Product>> {
    let code = ProductCode::parse(&code)?;
    let patch = ProductPatch::from_request(body)?;

    let updated = state
        .products()
        .update(&code, &patch)
        .await?
        .ok_or_else(|| not_found(&code))?;

    tracing::info!(code = %code, account_id = %claims.user.id, "product updated");
    Ok(Json(updated))
}

/// `DELETE /produk/{kd_produk}` (admin only)
pub async fn delete(
    State(state): State<AppState>,
    RequireRole(claims, _): RequireAdmin,
    Path(code): Path<String>,
) -> Result<StatusCode> {
    let code = ProductCode::parse(&code)?;

    if !state.products().delete(&code).await? {
        return Err(not_found(&code));
    }

    tracing::info!(code = %code, account_id = %claims.user.id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
