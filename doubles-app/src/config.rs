//! Configuration loading from environment.

use std::env;

use anyhow::{Context, bail};

/// Which of the two doubles is being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Issues,
    Payments,
}

impl ServiceKind {
    fn default_port(self) -> u16 {
        match self {
            ServiceKind::Issues => 8081,
            ServiceKind::Payments => 8080,
        }
    }

    fn port_var(self) -> &'static str {
        match self {
            ServiceKind::Issues => "ISSUES_PORT",
            ServiceKind::Payments => "PAYMENTS_PORT",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    /// Chance in `[0.0, 1.0]` that a request fails with a simulated upstream error
    pub fault_probability: f64,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env(kind: ServiceKind) -> anyhow::Result<Self> {
        Self::from_lookup(kind, |key| env::var(key).ok())
    }

    fn from_lookup(
        kind: ServiceKind,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let port = match lookup("PORT").or_else(|| lookup(kind.port_var())) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid port {raw:?}"))?,
            None => kind.default_port(),
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());

        let fault_probability = match lookup("FAULT_PROBABILITY") {
            Some(raw) => raw
                .parse::<f64>()
                .with_context(|| format!("FAULT_PROBABILITY must be a number, got {raw:?}"))?,
            None => 0.0,
        };
        if !(0.0..=1.0).contains(&fault_probability) {
            bail!("FAULT_PROBABILITY must be within [0.0, 1.0], got {fault_probability}");
        }

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | None => LogFormat::Pretty,
            Some(other) => bail!("LOG_FORMAT must be `pretty` or `json`, got {other:?}"),
        };

        Ok(Self {
            bind_addr,
            port,
            fault_probability,
            log_format,
        })
    }

    /// Socket address to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(kind: ServiceKind, vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(kind, |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let issues = load(ServiceKind::Issues, &[]).unwrap();
        assert_eq!(issues.addr(), "0.0.0.0:8081");
        assert_eq!(issues.fault_probability, 0.0);
        assert_eq!(issues.log_format, LogFormat::Pretty);

        let payments = load(ServiceKind::Payments, &[]).unwrap();
        assert_eq!(payments.port, 8080);
    }

    #[test]
    fn test_service_specific_port() {
        let config = load(ServiceKind::Payments, &[("PAYMENTS_PORT", "9090")]).unwrap();
        assert_eq!(config.port, 9090);

        let ignored = load(ServiceKind::Issues, &[("PAYMENTS_PORT", "9090")]).unwrap();
        assert_eq!(ignored.port, 8081);
    }

    #[test]
    fn test_generic_port_wins() {
        let config = load(
            ServiceKind::Issues,
            &[("PORT", "7000"), ("ISSUES_PORT", "9091")],
        )
        .unwrap();
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn test_fault_probability() {
        let config = load(ServiceKind::Issues, &[("FAULT_PROBABILITY", "0.25")]).unwrap();
        assert_eq!(config.fault_probability, 0.25);

        assert!(load(ServiceKind::Issues, &[("FAULT_PROBABILITY", "1.5")]).is_err());
        assert!(load(ServiceKind::Issues, &[("FAULT_PROBABILITY", "often")]).is_err());
    }

    #[test]
    fn test_log_format_and_bind_addr() {
        let config = load(
            ServiceKind::Payments,
            &[("LOG_FORMAT", "json"), ("BIND_ADDR", "127.0.0.1")],
        )
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.addr(), "127.0.0.1:8080");

        assert!(load(ServiceKind::Payments, &[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_bad_port() {
        assert!(load(ServiceKind::Issues, &[("ISSUES_PORT", "http")]).is_err());
    }
}
