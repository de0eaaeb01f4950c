use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::error::AppError;

/// Port used when neither `MOCK_LLM_PORT` nor `PORT` is set
pub const DEFAULT_PORT: u16 = 3001;

/// Bind address used when `MOCK_LLM_HOST` is not set
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let port = match env::var("MOCK_LLM_PORT").or_else(|_| env::var("PORT")) {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };

        let host_raw = env::var("MOCK_LLM_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let host = host_raw.parse().map_err(|_| AppError::Config {
            message: format!("MOCK_LLM_HOST is not an IP address: {}", host_raw),
        })?;

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        Ok(Config {
            server: ServerConfig { host, port },
            logging,
        })
    }
}

impl ServerConfig {
    /// Socket address the listener binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

fn parse_port(raw: &str) -> Result<u16, AppError> {
    raw.trim().parse().map_err(|_| AppError::Config {
        message: format!("port must be an integer between 0 and 65535, got {:?}", raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_accepts_whitespace() {
        assert_eq!(parse_port(" 4010 ").unwrap(), 4010);
    }

    #[test]
    fn test_parse_port_rejects_garbage() {
        let err = parse_port("http").unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        assert!(err.to_string().contains("\"http\""));
    }

    #[test]
    fn test_parse_port_rejects_out_of_range() {
        assert!(parse_port("70000").is_err());
    }

    #[test]
    fn test_server_config_socket_addr() {
        let server = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3101,
        };
        assert_eq!(server.socket_addr().to_string(), "127.0.0.1:3101");
    }

    #[test]
    fn test_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.port, DEFAULT_PORT);
        assert_eq!(server.host.to_string(), DEFAULT_HOST);
        assert_eq!(LoggingConfig::default().format, LogFormat::Pretty);
    }
}
