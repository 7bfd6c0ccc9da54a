use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Falha de rede: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sessão expirada, faça login novamente")]
    SessionExpired,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    #[error("{detail}")]
    Api { status: u16, detail: String },

    #[error("Autenticação falhou: {0}")]
    Auth(String),

    #[error("Validação falhou: {0}")]
    Validation(String),

    #[error("Erro: {0}")]
    Internal(String),
}

impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}

/// Extrai o campo `detail` de uma resposta de erro do backend.
/// String vem como está; estrutura vira JSON serializado.
pub fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned())
        .map(|d| match d {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
}

impl AppError {
    /// Erro de domínio reportado pelo backend; sem `detail`, usa a
    /// mensagem genérica informada.
    pub fn from_detail(status: u16, body: &str, fallback: &str) -> Self {
        let detail = extract_detail(body).unwrap_or_else(|| fallback.to_string());

        AppError::Api { status, detail }
    }
}
