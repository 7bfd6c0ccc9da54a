//! Diretório de vendedoras. A listagem é privilegiada: vendedora e perfil
//! desconhecido nem chamam o endpoint.

use crate::auth::policy::can_list_sellers;
use crate::errors::AppError;
use crate::gateway::ApiClient;
use crate::models::seller::{CreateSellerPayload, Seller, SellerAccess, UpdateSellerPayload};
use crate::validation::{validate_email, validate_seller_name};
use crate::log_info;

const NO_AUTHORITY: &str = "Você não tem autoridade para acessar essa informação.";
const SAVE_FALLBACK: &str = "Erro ao salvar vendedora.";
const STATUS_FALLBACK: &str = "Erro ao atualizar status.";
const DELETE_FALLBACK: &str = "Erro ao excluir.";

/// Lista o diretório. Perfil sem privilégio devolve lista vazia sem tocar
/// a rede; recusa do backend vira a mesma mensagem de autoridade.
pub async fn list(api: &ApiClient) -> Result<Vec<Seller>, AppError> {
    if !can_list_sellers(api.session().role()) {
        return Ok(Vec::new());
    }

    api.get_json("/sellers/", NO_AUTHORITY)
        .await
        .map_err(|err| match err {
            AppError::SessionExpired | AppError::Forbidden(_) => {
                AppError::Forbidden(NO_AUTHORITY.into())
            }
            other => other,
        })
}

/// Cria a vendedora e devolve o acesso gerado (com a senha temporária
/// para repasse).
pub async fn create(api: &ApiClient, payload: &CreateSellerPayload) -> Result<SellerAccess, AppError> {
    validate_seller_name(&payload.name).map_err(AppError::Validation)?;
    validate_email(&payload.email).map_err(AppError::Validation)?;

    let access: SellerAccess = api.post_json("/sellers/", payload, SAVE_FALLBACK).await?;
    log_info!("SELLERS", &format!("Vendedora {} criada", access.name));
    Ok(access)
}

/// Atualização parcial: renomear exige nome não vazio; ativar/desativar
/// passa direto.
pub async fn update(
    api: &ApiClient,
    id: i64,
    payload: &UpdateSellerPayload,
) -> Result<Seller, AppError> {
    if let Some(name) = payload.name.as_deref() {
        validate_seller_name(name).map_err(AppError::Validation)?;
    }

    let fallback = if payload.name.is_some() {
        SAVE_FALLBACK
    } else {
        STATUS_FALLBACK
    };

    api.put_json(&format!("/sellers/{}/", id), payload, fallback).await
}

pub async fn delete(api: &ApiClient, id: i64) -> Result<(), AppError> {
    api.delete(&format!("/sellers/{}/", id), DELETE_FALLBACK).await
}
