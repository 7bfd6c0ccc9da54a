//! Visão local do estoque: métricas, busca e ordenação sobre a lista de
//! produtos já carregada. Nada aqui toca a rede.

use crate::models::product::Product;

/// Estoque abaixo deste limite conta como "acabando".
pub const LOW_STOCK_THRESHOLD: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    /// Produtos cadastrados.
    pub total: usize,
    /// Soma das unidades em estoque.
    pub total_items: i64,
    /// Produtos com estoque zerado.
    pub out_of_stock: usize,
    /// Produtos com estoque positivo abaixo do limite.
    pub low_stock: usize,
}

pub fn stats(products: &[Product]) -> CatalogStats {
    CatalogStats {
        total: products.len(),
        total_items: products.iter().map(|p| p.stock.max(0)).sum(),
        out_of_stock: products.iter().filter(|p| p.stock <= 0).count(),
        low_stock: products
            .iter()
            .filter(|p| p.stock > 0 && p.stock < LOW_STOCK_THRESHOLD)
            .count(),
    }
}

/// Critério de ordenação da tabela de estoque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogSort {
    /// Alfabética por nome.
    #[default]
    Name,
    /// Preço do maior para o menor.
    PriceDesc,
    /// Estoque do maior para o menor.
    StockDesc,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Busca em nome e descrição (sem diferenciar maiúsculas).
    pub query: String,
    /// Só produtos com estoque acabando.
    pub only_low: bool,
    /// Só produtos com estoque zerado.
    pub only_out: bool,
}

fn matches_query(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    if product.name.to_lowercase().contains(query) {
        return true;
    }
    product
        .description
        .as_deref()
        .map(|d| d.to_lowercase().contains(query))
        .unwrap_or(false)
}

/// Aplica filtro e ordenação, devolvendo uma nova lista.
pub fn filter_and_sort(
    products: &[Product],
    filter: &CatalogFilter,
    sort: CatalogSort,
) -> Vec<Product> {
    let query = filter.query.trim().to_lowercase();

    let mut result: Vec<Product> = products
        .iter()
        .filter(|p| matches_query(p, &query))
        .filter(|p| !filter.only_low || (p.stock > 0 && p.stock < LOW_STOCK_THRESHOLD))
        .filter(|p| !filter.only_out || p.stock <= 0)
        .cloned()
        .collect();

    match sort {
        CatalogSort::Name => {
            result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        CatalogSort::PriceDesc => result.sort_by(|a, b| {
            b.price
                .partial_cmp(&a.price)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        CatalogSort::StockDesc => result.sort_by(|a, b| b.stock.cmp(&a.stock)),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, description: Option<&str>, price: f64, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: description.map(String::from),
            price,
            stock,
            active: true,
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Brinco Dourado", Some("par folheado"), 25.0, 10),
            product(2, "Colar Prata", None, 80.0, 0),
            product(3, "Anel Ajustável", Some("tamanho único"), 15.0, 3),
            product(4, "Pulseira", Some("couro dourado"), 40.0, 7),
        ]
    }

    #[test]
    fn stats_count_low_and_out_of_stock() {
        let s = stats(&sample());
        assert_eq!(s.total, 4);
        assert_eq!(s.total_items, 20);
        assert_eq!(s.out_of_stock, 1);
        assert_eq!(s.low_stock, 1); // só o anel: zerado não conta como acabando
    }

    #[test]
    fn query_matches_name_and_description() {
        let filter = CatalogFilter {
            query: "  DOURADO ".into(),
            ..Default::default()
        };
        let found = filter_and_sort(&sample(), &filter, CatalogSort::Name);
        let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Brinco Dourado", "Pulseira"]);
    }

    #[test]
    fn out_of_stock_filter_keeps_only_zeroed() {
        let filter = CatalogFilter {
            only_out: true,
            ..Default::default()
        };
        let found = filter_and_sort(&sample(), &filter, CatalogSort::Name);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Colar Prata");
    }

    #[test]
    fn low_stock_filter_excludes_zeroed() {
        let filter = CatalogFilter {
            only_low: true,
            ..Default::default()
        };
        let found = filter_and_sort(&sample(), &filter, CatalogSort::Name);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Anel Ajustável");
    }

    #[test]
    fn price_sort_is_descending() {
        let found = filter_and_sort(&sample(), &CatalogFilter::default(), CatalogSort::PriceDesc);
        let prices: Vec<f64> = found.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![80.0, 40.0, 25.0, 15.0]);
    }

    #[test]
    fn stock_sort_is_descending() {
        let found = filter_and_sort(&sample(), &CatalogFilter::default(), CatalogSort::StockDesc);
        let stocks: Vec<i64> = found.iter().map(|p| p.stock).collect();
        assert_eq!(stocks, vec![10, 7, 3, 0]);
    }
}
