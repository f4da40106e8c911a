//! Environment parsing.

use secrecy::SecretString;
use stackstart_core::StackId;

use crate::errors::{Result, SettingsError};
use crate::types::{
    DEFAULT_POLL_INTERVAL_SECONDS, DEFAULT_POLL_TIMEOUT_SECONDS, DEFAULT_VERIFY_TLS,
    ENV_POLL_INTERVAL_SECONDS, ENV_POLL_TIMEOUT_SECONDS, ENV_PORTAINER_API_KEY,
    ENV_PORTAINER_URL, ENV_STACK_SEQUENCE, ENV_VERIFY_TLS, ENV_WEBHOOK_URL, Settings,
};

const TRUE_TOKENS: [&str; 4] = ["1", "true", "yes", "on"];

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(ENV_PORTAINER_URL)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();
        let api_key = lookup(ENV_PORTAINER_API_KEY).unwrap_or_default();
        let stack_sequence = parse_stack_sequence(lookup(ENV_STACK_SEQUENCE).as_deref())?;
        let webhook_url = lookup(ENV_WEBHOOK_URL)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        let poll_interval_seconds = parse_seconds(
            lookup(ENV_POLL_INTERVAL_SECONDS).as_deref(),
            DEFAULT_POLL_INTERVAL_SECONDS,
        );
        let poll_timeout_seconds = parse_seconds(
            lookup(ENV_POLL_TIMEOUT_SECONDS).as_deref(),
            DEFAULT_POLL_TIMEOUT_SECONDS,
        );
        let verify_tls = parse_bool(lookup(ENV_VERIFY_TLS).as_deref(), DEFAULT_VERIFY_TLS);

        if base_url.is_empty() {
            return Err(SettingsError::Missing { var: ENV_PORTAINER_URL });
        }
        if api_key.is_empty() {
            return Err(SettingsError::Missing { var: ENV_PORTAINER_API_KEY });
        }
        if stack_sequence.is_empty() {
            return Err(SettingsError::EmptyStackSequence);
        }

        if !verify_tls {
            tracing::warn!("TLS certificate verification is disabled for the Portainer API");
        }

        Ok(Self {
            base_url,
            api_key: SecretString::from(api_key),
            stack_sequence,
            webhook_url,
            poll_interval_seconds,
            poll_timeout_seconds,
            verify_tls,
        })
    }
}

/// Parse a comma-separated list of stack ids.
///
/// Blank tokens are skipped. The first token that is not an integer fails
/// the whole parse.
pub fn parse_stack_sequence(raw: Option<&str>) -> Result<Vec<StackId>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<StackId>().map_err(|_| SettingsError::InvalidStackId {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Absent → `default`; present → true iff one of `1`, `true`, `yes`, `on`
/// (case-insensitive).
pub fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    match raw {
        None => default,
        Some(value) => {
            let value = value.trim().to_ascii_lowercase();
            TRUE_TOKENS.contains(&value.as_str())
        }
    }
}

/// Absent or unparseable → `default`.
pub fn parse_seconds(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
