use std::time::Duration;

use secrecy::SecretString;
use stackstart_core::StackId;

pub const ENV_PORTAINER_URL: &str = "PORTAINER_URL";
pub const ENV_PORTAINER_API_KEY: &str = "PORTAINER_API_KEY";
pub const ENV_STACK_SEQUENCE: &str = "STACK_SEQUENCE";
pub const ENV_WEBHOOK_URL: &str = "WEBHOOK_URL";
pub const ENV_POLL_INTERVAL_SECONDS: &str = "POLL_INTERVAL_SECONDS";
pub const ENV_POLL_TIMEOUT_SECONDS: &str = "POLL_TIMEOUT_SECONDS";
pub const ENV_VERIFY_TLS: &str = "VERIFY_TLS";

pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 5;
pub const DEFAULT_POLL_TIMEOUT_SECONDS: u64 = 300;
pub const DEFAULT_VERIFY_TLS: bool = true;

/// Validated configuration for one run.
///
/// [`Settings::from_env`] and [`Settings::from_lookup`] only return values
/// with a non-empty URL, key, and stack sequence. Fields stay public so
/// callers and tests can build a value directly, and such a value is not
/// re-checked. `Debug` output redacts the API key.
#[derive(Clone, Debug)]
pub struct Settings {
    /// API root without trailing slashes, e.g. `https://portainer.local:9443`.
    pub base_url: String,
    pub api_key: SecretString,
    /// Stacks to start, in execution order.
    pub stack_sequence: Vec<StackId>,
    pub webhook_url: Option<String>,
    pub poll_interval_seconds: u64,
    pub poll_timeout_seconds: u64,
    pub verify_tls: bool,
}

impl Settings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_seconds)
    }
}
