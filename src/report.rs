//! Agregação local dos relatórios.
//!
//! O backend manda o resumo pronto; a série temporal do gráfico é
//! re-derivada aqui só de `recent_orders`, agrupando por dia, semana ou
//! mês. A numeração de semana é a aproximação ancorada na quinta-feira
//! usada desde a primeira versão do painel; semanas viradas de ano
//! ficam com a numeração aproximada de propósito.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::report::{RecentOrder, ReportSummary, TopProduct, TopSeller};

/// Balde de vendas sem carimbo de data.
pub const NO_DATE_KEY: &str = "Sem data";

/// Resolução de agrupamento do gráfico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

/// Um balde da série: chave ordenável, rótulo de exibição, receita
/// arredondada a 2 casas e contagem de vendas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueBucket {
    pub key: String,
    pub label: String,
    pub revenue: f64,
    pub orders: i64,
}

/// `created_at` truncado ao dia (`YYYY-MM-DD`); ausente vira o sentinela.
fn date_key(created_at: Option<&str>) -> String {
    match created_at {
        Some(iso) if !iso.is_empty() => iso.chars().take(10).collect(),
        _ => NO_DATE_KEY.to_string(),
    }
}

/// Chave de semana `YYYY-W##`, ancorada na quinta-feira: anda até a
/// quinta da semana e conta semanas desde o 1º de janeiro daquele ano.
fn week_key(day_key: &str) -> String {
    let Ok(date) = NaiveDate::parse_from_str(day_key, "%Y-%m-%d") else {
        return day_key.to_string();
    };

    let day_num = date.weekday().number_from_monday() as i64; // seg=1 .. dom=7
    let thursday = date + Duration::days(4 - day_num);
    let Some(year_start) = NaiveDate::from_ymd_opt(thursday.year(), 1, 1) else {
        return day_key.to_string();
    };
    let day_of_year = (thursday - year_start).num_days() + 1;
    let week_no = (day_of_year + 6) / 7;

    format!("{}-W{:02}", thursday.year(), week_no)
}

/// Chave de mês `YYYY-MM`.
fn month_key(day_key: &str) -> String {
    day_key.chars().take(7).collect()
}

/// Rótulo `DD/MM` para chaves de dia.
fn day_label(day_key: &str) -> String {
    if day_key.len() != 10 {
        return day_key.to_string();
    }
    format!("{}/{}", &day_key[8..10], &day_key[5..7])
}

fn bucket_label(key: &str, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day if key != NO_DATE_KEY => day_label(key),
        Granularity::Week => key.replace('-', " ").replace('W', "Semana "),
        _ => key.to_string(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Agrupa as vendas recentes em baldes ordenados pela chave (ascendente).
/// Totais ausentes valem 0; o sentinela "Sem data" ordena após as chaves
/// de data.
pub fn revenue_series(orders: &[RecentOrder], granularity: Granularity) -> Vec<RevenueBucket> {
    let mut buckets: BTreeMap<String, (f64, i64)> = BTreeMap::new();

    for order in orders {
        let dk = date_key(order.created_at.as_deref());
        let key = if dk == NO_DATE_KEY {
            dk
        } else {
            match granularity {
                Granularity::Day => dk,
                Granularity::Week => week_key(&dk),
                Granularity::Month => month_key(&dk),
            }
        };

        let entry = buckets.entry(key).or_insert((0.0, 0));
        entry.0 += order.total;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(key, (revenue, orders))| RevenueBucket {
            label: bucket_label(&key, granularity),
            key,
            revenue: round2(revenue),
            orders,
        })
        .collect()
}

/// Receita média por venda no período; 0 quando não houve vendas.
pub fn ticket_medio(revenue: f64, orders: i64) -> f64 {
    if orders == 0 {
        0.0
    } else {
        revenue / orders as f64
    }
}

/// Média diária aproximada pelo período selecionado; 0 quando days = 0.
pub fn avg_daily(revenue: f64, days: i64) -> f64 {
    if days == 0 {
        0.0
    } else {
        revenue / days as f64
    }
}

/// Variação percentual de hoje contra a média diária; 0 quando a média
/// não é positiva.
pub fn today_vs_avg(today_revenue: f64, avg_daily: f64) -> f64 {
    if avg_daily <= 0.0 {
        0.0
    } else {
        ((today_revenue - avg_daily) / avg_daily) * 100.0
    }
}

/// Visão pronta para a tela de relatórios: série + métricas derivadas,
/// tudo função pura do resumo e do período pedido.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub series: Vec<RevenueBucket>,
    pub ticket_medio: f64,
    pub avg_daily: f64,
    pub today_vs_avg: f64,
    pub top_sellers: Vec<TopSeller>,
    pub top_products: Vec<TopProduct>,
}

pub fn build_view(summary: &ReportSummary, days: i64, granularity: Granularity) -> ReportView {
    let avg = avg_daily(summary.revenue, days);

    let top_sellers = summary
        .top_sellers
        .iter()
        .map(|s| TopSeller {
            seller: if s.seller.trim().is_empty() {
                "Sem vendedora".to_string()
            } else {
                s.seller.clone()
            },
            orders: s.orders,
            revenue: s.revenue,
        })
        .collect();

    ReportView {
        series: revenue_series(&summary.recent_orders, granularity),
        ticket_medio: ticket_medio(summary.revenue, summary.orders),
        avg_daily: avg,
        today_vs_avg: today_vs_avg(summary.revenue_today, avg),
        top_sellers,
        top_products: summary.top_products.clone(),
    }
}
