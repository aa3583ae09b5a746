//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración con soporte para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./hash_server --port 8080 --hash-delay-ms 5000
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 ./hash_server
//! ```

use crate::error::{HashServerError, Result};
use clap::Parser;
use std::time::Duration;

/// Tamaño mínimo aceptable para el buffer de requests
const MIN_REQUEST_BYTES: usize = 256;

/// Configuración del servidor de hashing
#[derive(Debug, Clone, Parser)]
#[command(name = "hash_server")]
#[command(about = "Servicio HTTP asíncrono de hashing de passwords")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Espera antes de calcular cada hash, en milisegundos
    #[arg(long = "hash-delay-ms", default_value = "5000", env = "HASH_DELAY_MS")]
    pub hash_delay_ms: u64,

    /// Tamaño máximo de un request (headers + body) en bytes
    #[arg(long = "max-request-bytes", default_value = "8192", env = "MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    /// Nivel de log por defecto (RUST_LOG tiene prioridad)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea la configuración parseando argumentos CLI y entorno
    pub fn new() -> Self {
        Config::parse()
    }

    /// Dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use hash_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn hash_delay(&self) -> Duration {
        Duration::from_millis(self.hash_delay_ms)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(HashServerError::InvalidConfig("Host must not be empty".to_string()));
        }
        if self.hash_delay_ms == 0 {
            return Err(HashServerError::InvalidConfig("Hash delay must be > 0".to_string()));
        }
        if self.max_request_bytes < MIN_REQUEST_BYTES {
            return Err(HashServerError::InvalidConfig(format!(
                "Max request bytes must be >= {}",
                MIN_REQUEST_BYTES
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            hash_delay_ms: 5_000,
            max_request_bytes: 8192,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.hash_delay(), Duration::from_secs(5));
        assert_eq!(config.max_request_bytes, 8192);
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    // ==================== Validation ====================

    #[test]
    fn test_validate_zero_delay() {
        let mut config = Config::default();
        config.hash_delay_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Hash delay"));
    }

    #[test]
    fn test_validate_small_request_limit() {
        let mut config = Config::default();
        config.max_request_bytes = 16;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, HashServerError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.host = "  ".to_string();
        assert!(config.validate().is_err());
    }

    // ==================== CLI ====================

    #[test]
    fn test_parse_cli_defaults_match_default() {
        let parsed = Config::try_parse_from(["hash_server"]).unwrap();
        let default = Config::default();
        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.host, default.host);
        assert_eq!(parsed.hash_delay_ms, default.hash_delay_ms);
    }

    #[test]
    fn test_parse_cli_flags() {
        let parsed = Config::try_parse_from([
            "hash_server",
            "-p",
            "9000",
            "--hash-delay-ms",
            "250",
        ])
        .unwrap();
        assert_eq!(parsed.port, 9000);
        assert_eq!(parsed.hash_delay(), Duration::from_millis(250));
    }
}
