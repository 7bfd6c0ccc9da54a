//! Busca do resumo de relatórios.

use crate::errors::AppError;
use crate::gateway::ApiClient;
use crate::models::report::ReportSummary;

pub const DEFAULT_DAYS: i64 = 30;

const LOAD_FALLBACK: &str = "Falha ao carregar relatórios. Verifique o endpoint /reports/summary.";

/// Resumo dos últimos `days` dias; `None` usa o período padrão. A falha
/// não mexe em dados já exibidos: o chamador mantém o estado anterior.
pub async fn summary(api: &ApiClient, days: Option<i64>) -> Result<ReportSummary, AppError> {
    let days = days.unwrap_or(DEFAULT_DAYS);
    api.get_json(&format!("/reports/summary?days={}", days), LOAD_FALLBACK)
        .await
}
