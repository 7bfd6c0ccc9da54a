use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSellerPayload {
    pub name: String,
    pub email: String,
}

/// Atualização parcial (renomear e/ou ativar/desativar).
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSellerPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Acesso gerado na criação, com a senha temporária para repasse.
#[derive(Debug, Clone, Deserialize)]
pub struct SellerAccess {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub temp_password: String,
}
