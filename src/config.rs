//! Configuração da aplicação.
//!
//! Precedência: variáveis de ambiente, depois o arquivo `.env`, depois
//! os padrões embutidos. A instância global vive em um `OnceLock`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::{env, fs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Lido de `APP_ENV`; qualquer coisa fora de "production" é
    /// desenvolvimento.
    pub fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub app_name: String,
    pub version: String,
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Gateway do backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Nome do arquivo de sessão, relativo ao diretório de dados.
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub log_to_file: bool,
    pub log_to_stdout: bool,
    pub json_format: bool,
    pub max_file_size_mb: u64,
    pub max_log_files: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let environment = Environment::from_env();

        Self {
            environment,
            app_name: env_or("APP_NAME", "OnMauri Admin"),
            version: env!("CARGO_PKG_VERSION").to_string(),
            api: ApiConfig {
                base_url: env_or("API_BASE_URL", "https://sistema-onmauri.onrender.com"),
                timeout_secs: env_parsed("API_TIMEOUT_SECS", 15),
                connect_timeout_secs: env_parsed("API_CONNECT_TIMEOUT_SECS", 10),
            },
            session: SessionConfig {
                file_name: env_or("SESSION_FILE", "session.json"),
            },
            logging: LoggingConfig {
                level: env_or(
                    "RUST_LOG",
                    if environment.is_production() { "warn" } else { "debug" },
                ),
                log_to_file: true,
                log_to_stdout: env::var("LOG_TO_STDOUT").map(|s| s == "true").unwrap_or(true),
                json_format: environment.is_production(),
                max_file_size_mb: 10,
                max_log_files: 5,
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self::default()
    }

    /// Carrega um `.env` (formato chave=valor) exportando cada entrada
    /// para o ambiente antes de montar a configuração.
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches('"').trim_matches('\'');
                env::set_var(key.trim(), value);
            }
        }

        Some(Self::default())
    }

    pub fn get_session_path(&self, app_data_dir: &Path) -> PathBuf {
        app_data_dir.join(&self.session.file_name)
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    /// Em produção o backend só pode ser acessado via HTTPS.
    pub fn validate(&self) -> Result<(), String> {
        if !self.api.base_url.starts_with("http") {
            return Err(format!("API_BASE_URL inválida: {}", self.api.base_url));
        }
        if self.is_production() && !self.api.base_url.starts_with("https") {
            return Err("Em produção o backend deve ser acessado via HTTPS".to_string());
        }
        Ok(())
    }
}

static GLOBAL_CONFIG: OnceLock<AppConfig> = OnceLock::new();

pub fn init_config() -> &'static AppConfig {
    GLOBAL_CONFIG.get_or_init(AppConfig::load)
}

pub fn get_config() -> &'static AppConfig {
    GLOBAL_CONFIG
        .get()
        .expect("Configuração não inicializada; chame init_config() antes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_backend() {
        let cfg = AppConfig::default();
        assert!(cfg.api.base_url.starts_with("http"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut cfg = AppConfig::default();
        cfg.api.base_url = "ftp://x".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn production_requires_https() {
        let mut cfg = AppConfig::default();
        cfg.environment = Environment::Production;
        cfg.api.base_url = "http://inseguro".to_string();
        assert!(cfg.validate().is_err());

        cfg.api.base_url = "https://seguro".to_string();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn session_path_uses_configured_file_name() {
        let cfg = AppConfig::default();
        let path = cfg.get_session_path(Path::new("/dados"));
        assert_eq!(path, Path::new("/dados").join("session.json"));
    }
}
