//! Motor do carrinho da tela de vendas.
//!
//! Todo o estado é local e toda operação é uma função pura de
//! (carrinho anterior, snapshot do catálogo, ação); nada aqui toca a
//! rede. A submissão fica em `services::orders`, que recebe o payload
//! montado por `build_order`.

use crate::auth::session::Role;
use crate::errors::AppError;
use crate::models::order::{CreateOrderPayload, DiscountType, OrderItemPayload, PaymentMethod};
use crate::models::product::Product;

/// Uma linha do carrinho: um produto distinto, quantidade positiva.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product: Product,
    pub qty: i64,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.product.price * self.qty as f64
    }
}

/// Carrinho + campos da venda em montagem.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    pub seller: String,
    pub payment: PaymentMethod,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub note: String,
}

fn stock_available(catalog: &[Product], product_id: i64) -> i64 {
    catalog
        .iter()
        .find(|p| p.id == product_id)
        .map(|p| p.stock)
        .unwrap_or(0)
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Linhas na ordem de inserção (ordem de exibição).
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total de unidades no carrinho (para o recibo).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    pub fn qty_in_cart(&self, product_id: i64) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product.id == product_id)
            .map(|l| l.qty)
            .unwrap_or(0)
    }

    /// Adiciona `qty` unidades do produto. Mescla com a linha existente;
    /// a soma nunca pode passar do estoque disponível.
    pub fn add_item(
        &mut self,
        catalog: &[Product],
        product_id: i64,
        qty: i64,
    ) -> Result<(), AppError> {
        let product = catalog
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| AppError::Validation("Produto inválido.".into()))?;

        if qty <= 0 {
            return Err(AppError::Validation(
                "Quantidade precisa ser maior que zero.".into(),
            ));
        }

        let available = product.stock;
        let current = self.qty_in_cart(product_id);
        if current + qty > available {
            return Err(AppError::Validation(format!(
                "Estoque insuficiente. Disponível: {}. No carrinho: {}.",
                available, current
            )));
        }

        match self.lines.iter_mut().find(|l| l.product.id == product_id) {
            Some(line) => line.qty += qty,
            None => self.lines.push(CartLine { product, qty }),
        }

        Ok(())
    }

    /// Aumenta em 1 a quantidade da linha. Falha sem alterar o estado
    /// quando passaria do estoque.
    pub fn increment(&mut self, catalog: &[Product], product_id: i64) -> Result<(), AppError> {
        let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) else {
            return Ok(());
        };

        let available = stock_available(catalog, product_id);
        if line.qty + 1 > available {
            return Err(AppError::Validation(format!(
                "Sem estoque para aumentar. Disponível: {}.",
                available
            )));
        }

        line.qty += 1;
        Ok(())
    }

    /// Diminui em 1; a linha some quando chega a zero.
    pub fn decrement(&mut self, product_id: i64) {
        for line in self.lines.iter_mut() {
            if line.product.id == product_id {
                line.qty -= 1;
            }
        }
        self.lines.retain(|l| l.qty > 0);
    }

    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Limpa a venda inteira. Vendedora logada mantém o próprio nome no
    /// campo de vendedora; os demais perfis voltam a escolher.
    pub fn clear(&mut self, role: Role, user_name: Option<&str>) {
        self.lines.clear();
        self.seller = if role == Role::Seller {
            user_name.unwrap_or("").to_string()
        } else {
            String::new()
        };
        self.payment = PaymentMethod::Pix;
        self.discount_type = DiscountType::None;
        self.discount_value = 0.0;
        self.note.clear();
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Desconto aplicado: dinheiro é limitado ao subtotal, percentual é
    /// limitado a [0, 100]. Nunca negativo.
    pub fn discount_amount(&self) -> f64 {
        if self.discount_type == DiscountType::None || self.discount_value <= 0.0 {
            return 0.0;
        }

        let subtotal = self.subtotal();
        match self.discount_type {
            DiscountType::Money => self.discount_value.min(subtotal),
            DiscountType::Percent => {
                let pct = self.discount_value.clamp(0.0, 100.0);
                (pct / 100.0) * subtotal
            }
            DiscountType::None => 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        (self.subtotal() - self.discount_amount()).max(0.0)
    }

    /// Pré-condições de finalização, na ordem (a primeira falha vence):
    /// carrinho não-vazio, vendedora resolvida, estoque ao vivo suficiente
    /// para cada linha (o estoque pode ter mudado desde o `add_item`).
    pub fn build_order(&self, catalog: &[Product], role: Role) -> Result<CreateOrderPayload, AppError> {
        if self.lines.is_empty() {
            return Err(AppError::Validation(
                "Adicione pelo menos 1 item no carrinho.".into(),
            ));
        }

        let seller = self.seller.trim();
        if seller.is_empty() {
            if role == Role::Seller {
                return Err(AppError::Validation(
                    "Não foi possível identificar a vendedora logada. Saia e entre novamente."
                        .into(),
                ));
            }
            return Err(AppError::Validation("Selecione uma vendedora.".into()));
        }

        for line in &self.lines {
            let available = stock_available(catalog, line.product.id);
            if line.qty > available {
                return Err(AppError::Validation(format!(
                    "Estoque insuficiente para \"{}\". Disponível: {}.",
                    line.product.name, available
                )));
            }
        }

        let note = self.note.trim();

        Ok(CreateOrderPayload {
            items: self
                .lines
                .iter()
                .map(|l| OrderItemPayload {
                    product_id: l.product.id,
                    quantity: l.qty,
                })
                .collect(),
            seller: seller.to_string(),
            payment: self.payment,
            discount_type: self.discount_type,
            discount_value: if self.discount_type == DiscountType::None {
                0.0
            } else {
                self.discount_value
            },
            note: if note.is_empty() { None } else { Some(note.to_string()) },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64, stock: i64) -> Product {
        Product {
            id,
            name: format!("Produto {}", id),
            description: None,
            price,
            stock,
            active: true,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![product(1, 50.0, 10), product(2, 19.9, 3)]
    }

    #[test]
    fn add_item_merges_lines_per_product() {
        let catalog = catalog();
        let mut cart = Cart::new();

        cart.add_item(&catalog, 1, 2).unwrap();
        cart.add_item(&catalog, 1, 3).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.qty_in_cart(1), 5);
    }

    #[test]
    fn add_item_rejects_when_cart_plus_request_exceeds_stock() {
        let catalog = catalog();
        let mut cart = Cart::new();

        cart.add_item(&catalog, 2, 2).unwrap();
        let err = cart.add_item(&catalog, 2, 2).unwrap_err();

        assert!(err.to_string().contains("Estoque insuficiente"));
        assert_eq!(cart.qty_in_cart(2), 2);
    }

    #[test]
    fn add_item_rejects_non_positive_quantity() {
        let catalog = catalog();
        let mut cart = Cart::new();

        assert!(cart.add_item(&catalog, 1, 0).is_err());
        assert!(cart.add_item(&catalog, 1, -1).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn increment_soft_fails_at_stock_limit() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 2, 3).unwrap();

        let err = cart.increment(&catalog, 2).unwrap_err();
        assert!(err.to_string().contains("Sem estoque para aumentar"));
        assert_eq!(cart.qty_in_cart(2), 3); // estado intacto
    }

    #[test]
    fn decrement_to_zero_removes_line() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 1, 1).unwrap();

        cart.decrement(1);
        assert!(cart.is_empty());

        // decrementar o que não existe não cria quantidade negativa
        cart.decrement(1);
        assert!(cart.is_empty());
    }

    #[test]
    fn subtotal_is_exact_sum_of_line_totals() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 1, 2).unwrap();
        cart.add_item(&catalog, 2, 3).unwrap();

        let expected: f64 = cart.lines().iter().map(|l| l.line_total()).sum();
        assert_eq!(cart.subtotal(), expected);
        assert!((cart.subtotal() - 159.7).abs() < 1e-9);
    }

    #[test]
    fn percent_discount_is_clamped_to_100() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 1, 2).unwrap(); // subtotal 100

        cart.discount_type = DiscountType::Percent;
        cart.discount_value = 250.0;

        assert_eq!(cart.discount_amount(), 100.0);
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn money_discount_never_exceeds_subtotal() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 1, 1).unwrap(); // subtotal 50

        cart.discount_type = DiscountType::Money;
        cart.discount_value = 80.0;

        assert_eq!(cart.discount_amount(), 50.0);
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn negative_discount_value_counts_as_zero() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 1, 1).unwrap();

        cart.discount_type = DiscountType::Money;
        cart.discount_value = -10.0;

        assert_eq!(cart.discount_amount(), 0.0);
        assert_eq!(cart.total(), 50.0);
    }

    #[test]
    fn build_order_requires_items_first() {
        let catalog = catalog();
        let cart = Cart::new();

        let err = cart.build_order(&catalog, Role::Admin).unwrap_err();
        assert!(err.to_string().contains("pelo menos 1 item"));
    }

    #[test]
    fn missing_seller_message_depends_on_role() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 1, 1).unwrap();

        let err = cart.build_order(&catalog, Role::Gerente).unwrap_err();
        assert!(err.to_string().contains("Selecione uma vendedora."));

        let err = cart.build_order(&catalog, Role::Seller).unwrap_err();
        assert!(err.to_string().contains("Saia e entre novamente"));
    }

    #[test]
    fn build_order_revalidates_against_live_stock() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 2, 3).unwrap();
        cart.seller = "Ana".into();

        // estoque caiu depois que o carrinho foi montado
        let live = vec![product(1, 50.0, 10), product(2, 19.9, 1)];
        let err = cart.build_order(&live, Role::Admin).unwrap_err();
        assert!(err.to_string().contains("Produto 2"));
    }

    #[test]
    fn build_order_forces_zero_discount_when_type_is_none() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 1, 1).unwrap();
        cart.seller = "Ana".into();
        cart.discount_value = 15.0; // sobra de um tipo selecionado antes
        cart.note = "  embrulhar  ".into();

        let payload = cart.build_order(&catalog, Role::Admin).unwrap();
        assert_eq!(payload.discount_value, 0.0);
        assert_eq!(payload.note.as_deref(), Some("embrulhar"));
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].quantity, 1);
    }

    #[test]
    fn clear_repopulates_seller_for_seller_role() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 1, 1).unwrap();
        cart.seller = "Escolhida".into();
        cart.discount_type = DiscountType::Percent;
        cart.discount_value = 10.0;
        cart.note = "obs".into();

        cart.clear(Role::Seller, Some("Ana"));
        assert!(cart.is_empty());
        assert_eq!(cart.seller, "Ana");
        assert_eq!(cart.payment, PaymentMethod::Pix);
        assert_eq!(cart.discount_type, DiscountType::None);
        assert_eq!(cart.discount_value, 0.0);
        assert!(cart.note.is_empty());

        cart.clear(Role::Admin, Some("Mauri"));
        assert_eq!(cart.seller, "");
    }
}
