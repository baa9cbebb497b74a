use std::env;
use std::net::SocketAddr;

use thiserror::Error;

use survey_notify::MailConfig;

pub const DEFAULT_BUCKET: &str = "survey-responses";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}='{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where participant documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    S3 { bucket: String },
    /// Process-local; everything is lost on exit.
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub storage: StorageBackend,
    pub listen_addr: SocketAddr,
    /// `None` disables feedback e-mail.
    pub mail: Option<MailConfig>,
    /// Running inside the Lambda runtime rather than as a plain server.
    pub lambda: bool,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source. Empty
    /// values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let storage = match get("SURVEY_STORAGE").as_deref() {
            None | Some("s3") => StorageBackend::S3 {
                bucket: get("SURVEY_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            },
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "SURVEY_STORAGE",
                    value: other.to_string(),
                    reason: "expected 's3' or 'memory'".to_string(),
                });
            }
        };

        let listen = get("SURVEY_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                var: "SURVEY_LISTEN_ADDR",
                value: listen.clone(),
                reason: e.to_string(),
            }
        })?;

        let mail = match (get("MAILGUN_DOMAIN"), get("MAILGUN_API_KEY")) {
            (Some(domain), Some(api_key)) => {
                let mut mail = MailConfig::new(domain, api_key);
                if let Some(api_base) = get("MAILGUN_API_BASE") {
                    mail.api_base = api_base;
                }
                if let Some(from) = get("MAIL_FROM") {
                    mail.from_address = from;
                }
                if let Some(subject) = get("MAIL_SUBJECT") {
                    mail.subject = subject;
                }
                Some(mail)
            }
            _ => None,
        };

        Ok(Self {
            storage,
            listen_addr,
            mail,
            lambda: get("AWS_LAMBDA_RUNTIME_API").is_some(),
        })
    }
}
