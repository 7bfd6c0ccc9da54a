//! Logger estruturado do painel.
//!
//! Linhas JSON em produção, formato legível em desenvolvimento. Um
//! arquivo por dia com rotação por tamanho. Tokens e senhas são
//! redigidos antes de qualquer coisa chegar ao disco.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// Níveis na ordem do RFC 5424: quanto menor, mais grave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Valor desconhecido cai em INFO.
    pub fn from_str_or_info(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "TRACE" => LogLevel::Trace,
            "DEBUG" => LogLevel::Debug,
            "WARN" => LogLevel::Warn,
            "ERROR" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub target: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LogEntry {
    fn render_human(&self) -> String {
        let mut line = format!(
            "{} [{}] [{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.level.as_str(),
            self.target,
            self.message
        );
        if let Some(data) = &self.data {
            line.push_str(&format!(" | {}", data));
        }
        if let Some(error) = &self.error {
            line.push_str(&format!(" | erro: {}", error));
        }
        line
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub log_to_file: bool,
    pub log_to_stdout: bool,
    pub json_format: bool,
    pub max_file_size_mb: u64,
    pub max_log_files: u32,
}

impl From<&crate::config::LoggingConfig> for LoggerConfig {
    fn from(cfg: &crate::config::LoggingConfig) -> Self {
        Self {
            level: LogLevel::from_str_or_info(&cfg.level),
            log_to_file: cfg.log_to_file,
            log_to_stdout: cfg.log_to_stdout,
            json_format: cfg.json_format,
            max_file_size_mb: cfg.max_file_size_mb,
            max_log_files: cfg.max_log_files,
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::from_str_or_info(
                &std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string()),
            ),
            log_to_file: true,
            log_to_stdout: true,
            json_format: cfg!(not(debug_assertions)),
            max_file_size_mb: 10,
            max_log_files: 5,
        }
    }
}

pub struct Logger {
    config: LoggerConfig,
    log_dir: PathBuf,
    current_file: Mutex<Option<BufWriter<File>>>,
}

impl Logger {
    pub fn init(app_data_dir: &Path, config: LoggerConfig) -> Result<Self, String> {
        let log_dir = app_data_dir.join("logs");
        std::fs::create_dir_all(&log_dir)
            .map_err(|e| format!("Falha ao criar diretório de logs: {}", e))?;

        let logger = Self {
            config,
            log_dir,
            current_file: Mutex::new(None),
        };
        logger.open_todays_file()?;
        Ok(logger)
    }

    fn todays_path(&self) -> PathBuf {
        self.log_dir
            .join(format!("onmauri-{}.log", Local::now().format("%Y-%m-%d")))
    }

    /// Abre o arquivo do dia, rotacionando antes se ele estourou o limite.
    fn open_todays_file(&self) -> Result<(), String> {
        let path = self.todays_path();

        let over_limit = std::fs::metadata(&path)
            .map(|m| m.len() >= self.config.max_file_size_mb * 1024 * 1024)
            .unwrap_or(false);
        if over_limit {
            self.shift_rotated_files(&path);
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| format!("Falha ao abrir arquivo de log: {}", e))?;

        *self.current_file.lock().unwrap() = Some(BufWriter::new(file));
        Ok(())
    }

    /// Desloca `.1` → `.2` → ... até o limite de arquivos; o mais antigo
    /// é descartado.
    fn shift_rotated_files(&self, current: &Path) {
        let date = Local::now().format("%Y-%m-%d").to_string();
        let numbered = |n: u32| self.log_dir.join(format!("onmauri-{}.{}.log", date, n));

        let _ = std::fs::remove_file(numbered(self.config.max_log_files));
        for n in (1..self.config.max_log_files).rev() {
            let _ = std::fs::rename(numbered(n), numbered(n + 1));
        }
        let _ = std::fs::rename(current, numbered(1));
    }

    fn write(&self, entry: &LogEntry) {
        if entry.level > self.config.level {
            return;
        }

        let line = if self.config.json_format {
            serde_json::to_string(entry).unwrap_or_else(|_| "{}".to_string())
        } else {
            entry.render_human()
        };

        if self.config.log_to_stdout {
            match entry.level {
                LogLevel::Error | LogLevel::Warn => eprintln!("{}", line),
                _ => println!("{}", line),
            }
        }

        if self.config.log_to_file {
            if let Ok(mut guard) = self.current_file.lock() {
                if let Some(writer) = guard.as_mut() {
                    let _ = writeln!(writer, "{}", line);
                    let _ = writer.flush();
                }
            }
        }
    }

    fn entry(
        &self,
        level: LogLevel,
        target: &'static str,
        message: &str,
        data: Option<serde_json::Value>,
        error: Option<&str>,
    ) {
        self.write(&LogEntry {
            timestamp: Local::now(),
            level,
            target,
            message: message.to_string(),
            data,
            error: error.map(String::from),
        });
    }

    pub fn error(&self, target: &'static str, message: &str, error: Option<&str>) {
        self.entry(LogLevel::Error, target, message, None, error);
    }

    pub fn warn(&self, target: &'static str, message: &str) {
        self.entry(LogLevel::Warn, target, message, None, None);
    }

    pub fn info(&self, target: &'static str, message: &str, data: Option<serde_json::Value>) {
        self.entry(LogLevel::Info, target, message, data.map(redact_sensitive_data), None);
    }

    pub fn debug(&self, target: &'static str, message: &str, data: Option<serde_json::Value>) {
        self.entry(LogLevel::Debug, target, message, data.map(redact_sensitive_data), None);
    }
}

/// Substitui valores de campos sensíveis (token, senha, chave) antes de
/// registrar. Recursivo em objetos e arrays.
pub fn redact_sensitive_data(value: serde_json::Value) -> serde_json::Value {
    const SENSITIVE: [&str; 5] = ["token", "password", "senha", "secret", "key"];

    match value {
        serde_json::Value::Object(mut map) => {
            for (key, val) in map.iter_mut() {
                let k = key.to_lowercase();
                if SENSITIVE.iter().any(|s| k.contains(s)) {
                    *val = serde_json::Value::String("***REDACTED***".to_string());
                } else {
                    *val = redact_sensitive_data(val.clone());
                }
            }
            serde_json::Value::Object(map)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(redact_sensitive_data).collect())
        }
        _ => value,
    }
}

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_global_logger(app_data_dir: &Path, config: LoggerConfig) -> Result<(), String> {
    let logger = Logger::init(app_data_dir, config)?;
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| "Logger já inicializado".to_string())
}

pub fn get_logger() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

#[macro_export]
macro_rules! log_error {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.error($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $err:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.error($target, $msg, Some(&$err));
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.warn($target, $msg);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.info($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $data:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.info($target, $msg, ::std::option::Option::Some($data));
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.debug($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $data:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.debug($target, $msg, ::std::option::Option::Some($data));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_tokens_and_passwords() {
        let value = json!({
            "token": "abc",
            "new_password": "Abc12!",
            "nested": { "api_key": "k", "seller": "Maria" },
            "items": [{ "senha": "x" }]
        });

        let redacted = redact_sensitive_data(value);
        assert_eq!(redacted["token"], "***REDACTED***");
        assert_eq!(redacted["new_password"], "***REDACTED***");
        assert_eq!(redacted["nested"]["api_key"], "***REDACTED***");
        assert_eq!(redacted["nested"]["seller"], "Maria");
        assert_eq!(redacted["items"][0]["senha"], "***REDACTED***");
    }

    #[test]
    fn level_parsing_defaults_to_info() {
        assert_eq!(LogLevel::from_str_or_info("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_info("nope"), LogLevel::Info);
    }

    #[test]
    fn human_format_appends_data_and_error() {
        let entry = LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Error,
            target: "TESTE",
            message: "falhou".into(),
            data: Some(json!({"id": 1})),
            error: Some("timeout".into()),
        };

        let line = entry.render_human();
        assert!(line.contains("[ERROR] [TESTE] falhou"));
        assert!(line.contains(r#"{"id":1}"#));
        assert!(line.contains("erro: timeout"));
    }

    #[test]
    fn entries_below_level_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::init(
            dir.path(),
            LoggerConfig {
                level: LogLevel::Warn,
                log_to_stdout: false,
                ..LoggerConfig::default()
            },
        )
        .unwrap();

        logger.info("TESTE", "não deve aparecer", None);
        logger.warn("TESTE", "deve aparecer");

        let content = std::fs::read_to_string(logger.todays_path()).unwrap();
        assert!(!content.contains("não deve aparecer"));
        assert!(content.contains("deve aparecer"));
    }
}
