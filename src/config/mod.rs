pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::house_canary;
use crate::core::{ConfigProvider, ProviderKind};
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_socket_addr,
    validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 7;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "home-data-svc")]
#[command(about = "Looks up home data for an address from an external provider")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_LISTEN_ADDRESS)]
    pub listen_address: String,

    #[arg(long, value_enum, default_value = "house-canary")]
    pub provider: ProviderKind,

    #[arg(long, env = "PROVIDER_ENDPOINT", default_value = house_canary::DEFAULT_ENDPOINT)]
    pub provider_endpoint: String,

    #[arg(long, env = "PROVIDER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "PROVIDER_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, help = "Directory for raw provider response snapshots")]
    pub snapshot_path: Option<String>,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn listen_address(&self) -> &str {
        &self.listen_address
    }

    fn provider_kind(&self) -> ProviderKind {
        self.provider
    }

    fn provider_endpoint(&self) -> &str {
        &self.provider_endpoint
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some((key.as_str(), secret.as_str())),
            _ => None,
        }
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn snapshot_path(&self) -> Option<&str> {
        self.snapshot_path.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)?;
        validate_credentials(
            "api_key",
            "api_secret",
            self.api_key.as_deref(),
            self.api_secret.as_deref(),
        )
    }
}

/// 共用的設定檢查，CLI 與 TOML 設定都會呼叫
pub(crate) fn validate_settings<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_socket_addr("listen_address", config.listen_address())?;
    validate_url("provider_endpoint", config.provider_endpoint())?;
    validate_positive_number("timeout_seconds", config.timeout_seconds(), 1)?;
    if let Some(path) = config.snapshot_path() {
        validate_path("snapshot_path", path)?;
    }
    Ok(())
}

/// API key 與 secret 必須同時提供或同時省略
pub(crate) fn validate_credentials(
    key_field: &str,
    secret_field: &str,
    key: Option<&str>,
    secret: Option<&str>,
) -> Result<()> {
    match (key, secret) {
        (Some(key), Some(secret)) => {
            validate_non_empty_string(key_field, key)?;
            validate_non_empty_string(secret_field, secret)
        }
        (None, None) => Ok(()),
        (Some(_), None) => Err(LookupError::MissingConfigError {
            field: secret_field.to_string(),
        }),
        (None, Some(_)) => Err(LookupError::MissingConfigError {
            field: key_field.to_string(),
        }),
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["home-data-svc"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);

        assert_eq!(config.listen_address(), DEFAULT_LISTEN_ADDRESS);
        assert_eq!(config.provider_kind(), ProviderKind::HouseCanary);
        assert_eq!(config.timeout_seconds(), 7);
        assert!(config.snapshot_path().is_none());
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--provider",
            "passthrough",
            "--provider-endpoint",
            "https://provider.example.com/lookup",
            "--api-key",
            "key",
            "--api-secret",
            "secret",
            "--timeout-seconds",
            "3",
        ]);

        assert_eq!(config.provider_kind(), ProviderKind::Passthrough);
        assert_eq!(config.provider_endpoint(), "https://provider.example.com/lookup");
        assert_eq!(config.credentials(), Some(("key", "secret")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let config = parse(&["--provider-endpoint", "not a url"]);
        assert!(config.validate().is_err());

        let config = parse(&["--timeout-seconds", "0"]);
        assert!(config.validate().is_err());

        let config = parse(&["--listen-address", "nowhere"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_half_credentials_rejected() {
        let config = parse(&["--api-key", "key"]);
        assert!(config.credentials().is_none());
        assert!(matches!(
            config.validate(),
            Err(LookupError::MissingConfigError { ref field }) if field == "api_secret"
        ));
    }
}
