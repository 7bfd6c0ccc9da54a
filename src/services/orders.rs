//! Submissão de vendas. O carrinho monta o payload (`cart::Cart::
//! build_order`); aqui só vai à rede e monta o recibo.

use crate::errors::AppError;
use crate::gateway::ApiClient;
use crate::models::order::{CreateOrderPayload, CreatedOrder, SaleReceipt};
use crate::validation::format_brl;
use crate::log_info;

const SAVE_FALLBACK: &str = "Falha ao salvar a venda. Verifique o backend e tente novamente.";

/// Envia a venda uma única vez (sem retry automático). No sucesso o
/// chamador limpa o carrinho e re-busca o catálogo.
pub async fn create_order(
    api: &ApiClient,
    payload: &CreateOrderPayload,
) -> Result<SaleReceipt, AppError> {
    let created: CreatedOrder = api.post_json("/orders/", payload, SAVE_FALLBACK).await?;

    let items: i64 = payload.items.iter().map(|i| i.quantity).sum();
    log_info!(
        "ORDERS",
        &format!("Venda {} registrada, {} itens", created.id, items)
    );

    Ok(SaleReceipt {
        total: format_brl(created.total),
        items,
        payment: payload.payment.label(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::SessionStore;
    use crate::config::AppConfig;
    use crate::models::order::{DiscountType, OrderItemPayload, PaymentMethod};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Arc;

    fn spawn_server(status_line: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> ApiClient {
        let mut config = AppConfig::default();
        config.api.base_url = base_url;
        ApiClient::new(&config, Arc::new(SessionStore::in_memory())).unwrap()
    }

    fn payload() -> CreateOrderPayload {
        CreateOrderPayload {
            items: vec![
                OrderItemPayload { product_id: 1, quantity: 2 },
                OrderItemPayload { product_id: 2, quantity: 1 },
            ],
            seller: "Ana".into(),
            payment: PaymentMethod::Dinheiro,
            discount_type: DiscountType::None,
            discount_value: 0.0,
            note: None,
        }
    }

    #[tokio::test]
    async fn receipt_formats_total_and_payment() {
        let base = spawn_server("200 OK", r#"{"id":7,"total":1234.5}"#);
        let api = client_for(base);

        let receipt = create_order(&api, &payload()).await.unwrap();
        assert_eq!(receipt.total, "R$ 1.234,50");
        assert_eq!(receipt.items, 3);
        assert_eq!(receipt.payment, "DINHEIRO");
    }

    #[tokio::test]
    async fn backend_detail_wins_over_generic_message() {
        let base = spawn_server(
            "422 Unprocessable Entity",
            r#"{"detail":"Estoque insuficiente"}"#,
        );
        let api = client_for(base);

        let err = create_order(&api, &payload()).await.unwrap_err();
        assert_eq!(err.to_string(), "Estoque insuficiente");
    }
}
