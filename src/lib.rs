pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod logger;
pub mod models;
pub mod report;
pub mod services;
pub mod validation;

use std::path::Path;
use std::sync::Arc;

use auth::session::SessionStore;
use errors::AppError;
use gateway::ApiClient;

/// Estado global da aplicação: sessão compartilhada e gateway do backend.
pub struct AppState {
    pub api: ApiClient,
    pub session: Arc<SessionStore>,
}

impl AppState {
    /// Sobe a aplicação: configuração, logger, sessão persistida e
    /// gateway, nessa ordem. Falha de logger não é fatal.
    pub fn init(app_data_dir: &Path) -> Result<Self, AppError> {
        let config = config::init_config();
        config.validate().map_err(AppError::Internal)?;

        let logger_config = logger::LoggerConfig::from(&config.logging);
        if let Err(e) = logger::init_global_logger(app_data_dir, logger_config) {
            eprintln!("Aviso: logger não inicializado: {}", e);
        }

        log_info!(
            "APP",
            "Aplicação iniciando",
            serde_json::json!({
                "version": config.version,
                "environment": config.environment.as_str(),
                "backend": config.api.base_url,
            })
        );

        let session = Arc::new(SessionStore::load(config.get_session_path(app_data_dir)));
        let api = ApiClient::new(config, Arc::clone(&session))?;

        Ok(Self { api, session })
    }
}
