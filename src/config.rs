use crate::{
    adapters::stripe::signature::DEFAULT_TOLERANCE_SECS,
    domain::{error::ConfigError, policy::AckPolicy},
};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub webhook_path: String,
    /// `None` keeps the server up but answers every webhook with 500.
    pub stripe_webhook_secret: Option<String>,
    pub webhook_tolerance_secs: i64,
    pub ack_policy: AckPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let webhook_tolerance_secs = match get("WEBHOOK_TOLERANCE_SECS") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(secs) if secs >= 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "WEBHOOK_TOLERANCE_SECS",
                        value: raw,
                    });
                }
            },
            None => DEFAULT_TOLERANCE_SECS,
        };

        let webhook_path = get("WEBHOOK_PATH").unwrap_or_else(|| "/webhook".to_string());
        if !webhook_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                name: "WEBHOOK_PATH",
                value: webhook_path,
            });
        }

        let ack_policy = match get("ACK_POLICY") {
            Some(raw) => raw.trim().parse()?,
            None => AckPolicy::default(),
        };

        Ok(Self {
            database_url,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            webhook_path,
            stripe_webhook_secret: get("STRIPE_WEBHOOK_SECRET"),
            webhook_tolerance_secs,
            ack_policy,
        })
    }
}
