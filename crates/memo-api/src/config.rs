//! Server configuration, read once at startup.
//!
//! Environment variables:
//!   DATABASE_URL - SQLite URL (default: "sqlite://data.db")
//!   HOST         - bind address (default: "0.0.0.0")
//!   PORT         - bind port (default: 42069)
//!   PAGES_DIR    - directory holding the HTML pages (default: "./pages")
//!   CSS_DIR      - directory holding styles.css (default: "./css")
//!   LOG_FORMAT   - "json" or "text" (default: "text")
//!   LOG_FILE     - path to log file (optional, enables file logging)
//!   LOG_ANSI     - "true"/"false" override ANSI colors (auto-detected by default)

use std::net::SocketAddr;
use std::path::PathBuf;

use memo_core::{Error, Result};
use memo_db::DEFAULT_DATABASE_URL;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 42069;
pub const DEFAULT_PAGES_DIR: &str = "./pages";
pub const DEFAULT_CSS_DIR: &str = "./css";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Write to a daily-rotated file instead of stdout.
    pub file: Option<PathBuf>,
    /// ANSI color override; `None` leaves the default.
    pub ansi: Option<bool>,
}

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pages_dir: PathBuf,
    pub css_dir: PathBuf,
    pub log: LogConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("PORT '{}' is not a valid port: {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(Error::Config(format!(
                    "LOG_FORMAT must be 'text' or 'json', got '{}'",
                    other
                )))
            }
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            pages_dir: PathBuf::from(
                lookup("PAGES_DIR").unwrap_or_else(|| DEFAULT_PAGES_DIR.to_string()),
            ),
            css_dir: PathBuf::from(lookup("CSS_DIR").unwrap_or_else(|| DEFAULT_CSS_DIR.to_string())),
            log: LogConfig {
                format,
                file: lookup("LOG_FILE").map(PathBuf::from),
                ansi: lookup("LOG_ANSI").map(|v| v == "true" || v == "1"),
            },
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid bind address: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://data.db");
        assert_eq!(config.port, 42069);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.pages_dir, PathBuf::from("./pages"));
        assert_eq!(config.css_dir, PathBuf::from("./css"));
        assert_eq!(config.log.format, LogFormat::Text);
        assert_eq!(config.log.file, None);
        assert_eq!(config.log.ansi, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite:///var/lib/memo/notes.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("LOG_FORMAT", "json"),
            ("LOG_FILE", "/var/log/memo.log"),
            ("LOG_ANSI", "false"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite:///var/lib/memo/notes.db");
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.file, Some(PathBuf::from("/var/log/memo.log")));
        assert_eq!(config.log.ansi, Some(false));
    }

    #[test]
    fn test_bad_port_is_config_error() {
        let result = config_from(&[("PORT", "not-a-port")]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_log_format_is_config_error() {
        let result = config_from(&[("LOG_FORMAT", "xml")]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_bad_host_is_config_error() {
        let config = config_from(&[("HOST", "not a host")]).unwrap();
        assert!(matches!(config.bind_addr(), Err(Error::Config(_))));
    }
}
