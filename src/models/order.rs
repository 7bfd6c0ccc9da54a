use serde::{Deserialize, Serialize};

/// Forma de pagamento aceita no balcão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Pix,
    Credito,
    Debito,
    Dinheiro,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Pix
    }
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Credito => "credito",
            PaymentMethod::Debito => "debito",
            PaymentMethod::Dinheiro => "dinheiro",
        }
    }

    /// Rótulo para recibo (maiúsculas, como o balcão exibe).
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

/// Tipo de desconto aplicado na venda inteira.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    None,
    Money,
    Percent,
}

impl Default for DiscountType {
    fn default() -> Self {
        DiscountType::None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemPayload {
    pub product_id: i64,
    pub quantity: i64,
}

/// Payload de criação de venda. O backend calcula total e atribui id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderPayload {
    pub items: Vec<OrderItemPayload>,
    pub seller: String,
    pub payment: PaymentMethod,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub note: Option<String>,
}

/// Venda criada; só os campos que o cliente usa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: i64,
    #[serde(default)]
    pub total: f64,
}

/// Recibo exibido após finalizar a venda.
#[derive(Debug, Clone, Serialize)]
pub struct SaleReceipt {
    pub total: String,
    pub items: i64,
    pub payment: String,
}
