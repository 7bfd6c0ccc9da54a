use serde::{Deserialize, Serialize};

/// Produto do catálogo. A fonte de verdade fica no backend, o cliente só
/// guarda uma cópia re-buscável. Campos numéricos ausentes valem 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Payload de criação/edição de produto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
}
