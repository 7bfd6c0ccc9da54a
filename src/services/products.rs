//! CRUD de produtos. Validação local primeiro; nada vai à rede com campo
//! inválido.

use crate::errors::AppError;
use crate::gateway::ApiClient;
use crate::models::product::{Product, ProductPayload};
use crate::validation::{validate_amount, validate_product_name, validate_stock};

const SAVE_FALLBACK: &str = "Falha ao salvar. Verifique o backend e tente novamente.";
const DELETE_FALLBACK: &str = "Falha ao excluir. Verifique o backend e tente novamente.";

fn validate_payload(payload: &ProductPayload) -> Result<(), AppError> {
    validate_product_name(&payload.name).map_err(AppError::Validation)?;
    validate_amount(payload.price).map_err(AppError::Validation)?;
    validate_stock(payload.stock).map_err(AppError::Validation)?;
    Ok(())
}

pub async fn list(api: &ApiClient) -> Result<Vec<Product>, AppError> {
    api.get_json("/products/", "Falha ao carregar produtos.").await
}

pub async fn create(api: &ApiClient, payload: &ProductPayload) -> Result<Product, AppError> {
    validate_payload(payload)?;
    api.post_json("/products/", payload, SAVE_FALLBACK).await
}

pub async fn update(
    api: &ApiClient,
    id: i64,
    payload: &ProductPayload,
) -> Result<Product, AppError> {
    validate_payload(payload)?;
    api.put_json(&format!("/products/{}", id), payload, SAVE_FALLBACK)
        .await
}

pub async fn delete(api: &ApiClient, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/products/{}", id), DELETE_FALLBACK).await
}
