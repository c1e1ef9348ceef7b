//! Runtime configuration from command-line flags and `MESS_*` environment variables.

use clap::Parser;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid bind address '{0}': expected host:port")]
    InvalidBind(String),

    #[error("Unsupported database URL '{0}': expected sqlite: or file:")]
    UnsupportedDatabase(String),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "mess-admin")]
#[command(about = "Mess and hostel administration backend")]
pub struct AppConfig {
    /// SQLite database URL; the file is created when missing
    #[arg(long, env = "MESS_DATABASE_URL", default_value = "sqlite:mess.db")]
    pub database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "MESS_BIND", default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Browser origin allowed by CORS; cross-origin requests are refused when unset
    #[arg(long, env = "MESS_ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, env = "MESS_LOG_JSON")]
    pub log_json: bool,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if !(self.database_url.starts_with("sqlite:") || self.database_url.starts_with("file:")) {
            return Err(ConfigError::UnsupportedDatabase(self.database_url.clone()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.bind.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("mess-admin").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--database-url",
            "sqlite:/tmp/test.db",
            "--bind",
            "0.0.0.0:8080",
            "--allowed-origin",
            "http://localhost:5173",
            "--log-json",
        ]);
        assert_eq!(config.database_url, "sqlite:/tmp/test.db");
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
        assert_eq!(config.allowed_origin.as_deref(), Some("http://localhost:5173"));
        assert!(config.log_json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = parse(&["--database-url", "sqlite:mess.db", "--bind", "localhost"]);
        assert_eq!(config.validate(), Err(ConfigError::InvalidBind("localhost".to_string())));

        let config = parse(&["--database-url", "postgres://db/mess", "--bind", "127.0.0.1:3000"]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedDatabase("postgres://db/mess".to_string()))
        );
    }
}
