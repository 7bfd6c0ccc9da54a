use serde::{Deserialize, Serialize};

/// Resumo agregado pelo backend para o período pedido.
/// O cliente re-deriva a série temporal só de `recent_orders`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(default)]
    pub date_from: String,
    #[serde(default)]
    pub date_to: String,

    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub orders: i64,
    #[serde(default)]
    pub items: i64,

    #[serde(default)]
    pub revenue_today: f64,
    #[serde(default)]
    pub orders_today: i64,

    #[serde(default)]
    pub top_products: Vec<TopProduct>,
    #[serde(default)]
    pub top_sellers: Vec<TopSeller>,
    #[serde(default)]
    pub recent_orders: Vec<RecentOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopProduct {
    pub product_id: i64,
    pub name: String,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopSeller {
    #[serde(default)]
    pub seller: String,
    #[serde(default)]
    pub orders: i64,
    #[serde(default)]
    pub revenue: f64,
}

/// Venda recente (entrada do agregador local).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentOrder {
    pub id: i64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub payment: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
