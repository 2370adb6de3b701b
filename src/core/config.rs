use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, Serializer};
use std::env;
use std::time::Duration;

/// Credentials and endpoint override shared by every call of one adapter.
///
/// Serializing never writes a secret; deserializing wraps them straight away.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "PlainConfig")]
pub struct ExchangeConfig {
    pub api_key: Secret<String>,
    pub secret_key: Secret<String>,
    pub passphrase: Option<Secret<String>>,
    pub account_id: Option<String>,
    pub base_url: Option<String>,
}

const REDACTED: &str = "[REDACTED]";

#[derive(Deserialize)]
struct PlainConfig {
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    secret_key: String,
    passphrase: Option<String>,
    account_id: Option<String>,
    base_url: Option<String>,
}

impl From<PlainConfig> for ExchangeConfig {
    fn from(plain: PlainConfig) -> Self {
        Self {
            api_key: Secret::new(plain.api_key),
            secret_key: Secret::new(plain.secret_key),
            passphrase: plain.passphrase.map(Secret::new),
            account_id: plain.account_id,
            base_url: plain.base_url,
        }
    }
}

#[derive(Serialize)]
struct RedactedConfig<'a> {
    api_key: &'static str,
    secret_key: &'static str,
    passphrase: Option<&'static str>,
    account_id: Option<&'a str>,
    base_url: Option<&'a str>,
}

impl Serialize for ExchangeConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RedactedConfig {
            api_key: REDACTED,
            secret_key: REDACTED,
            passphrase: self.passphrase.as_ref().map(|_| REDACTED),
            account_id: self.account_id.as_deref(),
            base_url: self.base_url.as_deref(),
        }
        .serialize(serializer)
    }
}

impl ExchangeConfig {
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            passphrase: None,
            account_id: None,
            base_url: None,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{EXCHANGE}_API_KEY` (e.g., `HUOBI_API_KEY`)
    /// - `{EXCHANGE}_SECRET_KEY`
    /// - `{EXCHANGE}_PASSPHRASE` (optional; OKEx signing, Bitz trade password)
    /// - `{EXCHANGE}_ACCOUNT_ID` (optional; Huobi spot account)
    /// - `{EXCHANGE}_BASE_URL` (optional)
    pub fn from_env(exchange_prefix: &str) -> Result<Self, ConfigError> {
        let prefix = exchange_prefix.to_uppercase();
        let optional = |suffix: &str| env::var(format!("{}_{}", prefix, suffix)).ok();
        let required = |suffix: &str| {
            let name = format!("{}_{}", prefix, suffix);
            env::var(&name).map_err(|_| ConfigError::MissingEnvironmentVariable(name))
        };

        Ok(Self {
            api_key: Secret::new(required("API_KEY")?),
            secret_key: Secret::new(required("SECRET_KEY")?),
            passphrase: optional("PASSPHRASE").map(Secret::new),
            account_id: optional("ACCOUNT_ID"),
            base_url: optional("BASE_URL"),
        })
    }

    /// [`Self::from_env`] after loading `./.env`, when there is one.
    ///
    /// Keep `.env` files out of version control.
    #[cfg(feature = "env-file")]
    pub fn from_env_file(exchange_prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(exchange_prefix, ".env")
    }

    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(
        exchange_prefix: &str,
        env_file_path: &str,
    ) -> Result<Self, ConfigError> {
        if let Err(err) = dotenv::from_path(env_file_path) {
            let missing = matches!(&err, dotenv::Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound);
            if !missing {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "cannot load {}: {}",
                    env_file_path, err
                )));
            }
        }
        Self::from_env(exchange_prefix)
    }

    /// Configuration for public market data only.
    #[must_use]
    pub fn read_only() -> Self {
        Self::new(String::new(), String::new())
    }

    /// Check if this configuration has valid credentials for authenticated operations
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.secret_key.expose_secret().is_empty()
    }

    #[must_use]
    pub fn passphrase(mut self, passphrase: String) -> Self {
        self.passphrase = Some(Secret::new(passphrase));
        self
    }

    #[must_use]
    pub fn account_id(mut self, account_id: String) -> Self {
        self.account_id = Some(account_id);
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }
}

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/86.0.4240.75 Safari/537.36";

/// Settings for the default HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub proxy: Option<String>,
    pub user_agent: String,
    pub max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_idle_per_host: 10,
        }
    }
}

impl HttpConfig {
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    #[must_use]
    pub const fn with_max_idle_per_host(mut self, max_idle_per_host: usize) -> Self {
        self.max_idle_per_host = max_idle_per_host;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown exchange: {0}")]
    UnknownExchange(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
