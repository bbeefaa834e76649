// crates/cert-portal-config/src/config.rs
// ============================================================================
// Module: Cert Portal Configuration
// Description: Configuration loading and validation for the portal client.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: cert-portal-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed. Config files are untrusted
//! input; hard limits apply before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::SystemTime;

use cert_portal_core::DEFAULT_PASSING_SCORE;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "cert-portal.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "CERT_PORTAL_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum allowed request timeout in milliseconds.
pub(crate) const MIN_REQUEST_TIMEOUT_MS: u64 = 100;
/// Maximum allowed request timeout in milliseconds.
pub(crate) const MAX_REQUEST_TIMEOUT_MS: u64 = 120_000;
/// Default request timeout in milliseconds.
pub(crate) const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
/// Default maximum response body size in bytes.
pub(crate) const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Maximum allowed response body size in bytes.
pub(crate) const MAX_MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;
/// Maximum length of the configured base URL.
pub(crate) const MAX_BASE_URL_LENGTH: usize = 2048;
/// Maximum length of the configured user agent string.
pub(crate) const MAX_USER_AGENT_LENGTH: usize = 200;
/// Default user agent sent with portal requests.
pub(crate) const DEFAULT_USER_AGENT: &str = "cert-portal/0.1";
/// Default session file name.
pub(crate) const DEFAULT_SESSION_FILE: &str = "cert-portal-session.toml";
/// Default name of the backend session cookie.
pub(crate) const DEFAULT_COOKIE_NAME: &str = "portal_session";
/// Maximum length of the session cookie name.
pub(crate) const MAX_COOKIE_NAME_LENGTH: usize = 64;
/// Maximum passing score threshold in percent.
pub(crate) const MAX_PASSING_SCORE: u32 = 100;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Cert Portal client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CertPortalConfig {
    /// Backend API endpoint configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session persistence configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Exam presentation configuration.
    #[serde(default)]
    pub exam: ExamConfig,
    /// Optional config source metadata (not serialized).
    #[serde(skip)]
    pub source_modified_at: Option<SystemTime>,
}

impl CertPortalConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.source_modified_at = fs::metadata(&resolved).and_then(|meta| meta.modified()).ok();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from disk, falling back to built-in defaults when
    /// no path was given, the environment override is unset, and the default
    /// config file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an explicitly specified file fails to
    /// load or validate.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if path.is_none()
            && env::var_os(CONFIG_ENV_VAR).is_none()
            && !Path::new(DEFAULT_CONFIG_NAME).exists()
        {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        Self::load(path)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.session.validate()?;
        self.exam.validate()?;
        Ok(())
    }
}

/// Backend API endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the portal backend. Empty means unconfigured; commands
    /// that talk to the backend require a value.
    #[serde(default)]
    pub base_url: String,
    /// Allows plain-http base URLs (local development only).
    #[serde(default)]
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum response body size in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// User agent header sent with each request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            allow_http: false,
            timeout_ms: default_request_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Validates API endpoint configuration.
    ///
    /// An empty `base_url` is accepted here; client construction rejects it
    /// so that offline commands keep working without a backend.
    fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url.trim();
        if !base_url.is_empty() {
            if base_url.len() > MAX_BASE_URL_LENGTH {
                return Err(ConfigError::Invalid("api.base_url exceeds max length".to_string()));
            }
            let is_https = base_url.starts_with("https://");
            let is_http = base_url.starts_with("http://");
            if !is_https && !is_http {
                return Err(ConfigError::Invalid(
                    "api.base_url must start with http:// or https://".to_string(),
                ));
            }
            if is_http && !self.allow_http {
                return Err(ConfigError::Invalid(
                    "api.base_url requires https unless allow_http is enabled".to_string(),
                ));
            }
        }
        if self.timeout_ms < MIN_REQUEST_TIMEOUT_MS || self.timeout_ms > MAX_REQUEST_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "api.timeout_ms must be between {MIN_REQUEST_TIMEOUT_MS} and \
                 {MAX_REQUEST_TIMEOUT_MS}",
            )));
        }
        if self.max_response_bytes == 0 {
            return Err(ConfigError::Invalid(
                "api.max_response_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_response_bytes > MAX_MAX_RESPONSE_BYTES {
            return Err(ConfigError::Invalid("api.max_response_bytes too large".to_string()));
        }
        let user_agent = self.user_agent.trim();
        if user_agent.is_empty() {
            return Err(ConfigError::Invalid("api.user_agent must be non-empty".to_string()));
        }
        if user_agent.len() > MAX_USER_AGENT_LENGTH {
            return Err(ConfigError::Invalid("api.user_agent exceeds max length".to_string()));
        }
        Ok(())
    }

    /// Returns the configured request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns whether a backend base URL has been configured.
    #[must_use]
    pub fn has_base_url(&self) -> bool {
        !self.base_url.trim().is_empty()
    }
}

/// Session persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Path of the TOML session file.
    #[serde(default = "default_session_path")]
    pub path: String,
    /// Name of the backend session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl SessionConfig {
    /// Validates session persistence configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("session.path", &self.path)?;
        let name = self.cookie_name.trim();
        if name.is_empty() {
            return Err(ConfigError::Invalid("session.cookie_name must be non-empty".to_string()));
        }
        if name.len() > MAX_COOKIE_NAME_LENGTH {
            return Err(ConfigError::Invalid(
                "session.cookie_name exceeds max length".to_string(),
            ));
        }
        if !name.bytes().all(is_cookie_token_byte) {
            return Err(ConfigError::Invalid(
                "session.cookie_name contains invalid characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Exam presentation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamConfig {
    /// Passing score threshold used by offline practice scoring.
    #[serde(default = "default_passing_score")]
    pub passing_score: u32,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            passing_score: default_passing_score(),
        }
    }
}

impl ExamConfig {
    /// Validates exam presentation configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.passing_score > MAX_PASSING_SCORE {
            return Err(ConfigError::Invalid(format!(
                "exam.passing_score must be at most {MAX_PASSING_SCORE}",
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Returns whether a byte is a valid RFC 6265 cookie-name token byte.
const fn is_cookie_token_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

/// Default request timeout in milliseconds.
pub(crate) const fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

/// Default maximum response body size in bytes.
pub(crate) const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Default user agent string.
pub(crate) fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Default session file path.
pub(crate) fn default_session_path() -> String {
    DEFAULT_SESSION_FILE.to_string()
}

/// Default session cookie name.
pub(crate) fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

/// Default passing score threshold in percent.
pub(crate) const fn default_passing_score() -> u32 {
    DEFAULT_PASSING_SCORE
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    // ============================================================================
    // SECTION: ApiConfig::validate() Tests
    // ============================================================================

    #[test]
    fn api_config_validate_accepts_default() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok(), "default ApiConfig should pass validation");
    }

    #[test]
    fn api_config_validate_accepts_https_base_url() {
        let config = ApiConfig {
            base_url: "https://portal.example.org".to_string(),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_ok(), "https base_url should pass validation");
    }

    #[test]
    fn api_config_validate_rejects_http_without_allow_http() {
        let config = ApiConfig {
            base_url: "http://localhost:8000".to_string(),
            ..ApiConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "plain-http base_url should fail without allow_http");
        assert!(result.unwrap_err().to_string().contains("allow_http"));
    }

    #[test]
    fn api_config_validate_accepts_http_with_allow_http() {
        let config = ApiConfig {
            base_url: "http://localhost:8000".to_string(),
            allow_http: true,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_ok(), "plain-http base_url should pass with allow_http");
    }

    #[test]
    fn api_config_validate_rejects_unknown_scheme() {
        let config = ApiConfig {
            base_url: "ftp://portal.example.org".to_string(),
            ..ApiConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "non-http scheme should fail validation");
        assert!(result.unwrap_err().to_string().contains("base_url"));
    }

    #[test]
    fn api_config_validate_rejects_overlong_base_url() {
        let config = ApiConfig {
            base_url: format!("https://{}", "a".repeat(MAX_BASE_URL_LENGTH)),
            ..ApiConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "overlong base_url should fail validation");
        assert!(result.unwrap_err().to_string().contains("max length"));
    }

    #[test]
    fn api_config_validate_rejects_timeout_below_minimum() {
        let config = ApiConfig {
            timeout_ms: MIN_REQUEST_TIMEOUT_MS - 1,
            ..ApiConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "timeout below minimum should fail validation");
        assert!(result.unwrap_err().to_string().contains("timeout_ms"));
    }

    #[test]
    fn api_config_validate_rejects_timeout_above_maximum() {
        let config = ApiConfig {
            timeout_ms: MAX_REQUEST_TIMEOUT_MS + 1,
            ..ApiConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "timeout above maximum should fail validation");
        assert!(result.unwrap_err().to_string().contains("timeout_ms"));
    }

    #[test]
    fn api_config_validate_accepts_timeout_bounds() {
        let bounds = [MIN_REQUEST_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS, MAX_REQUEST_TIMEOUT_MS];
        for timeout_ms in bounds {
            let config = ApiConfig {
                timeout_ms,
                ..ApiConfig::default()
            };
            assert!(config.validate().is_ok(), "timeout {timeout_ms} should be valid");
        }
    }

    #[test]
    fn api_config_validate_rejects_zero_max_response_bytes() {
        let config = ApiConfig {
            max_response_bytes: 0,
            ..ApiConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "max_response_bytes=0 should fail validation");
        assert!(result.unwrap_err().to_string().contains("max_response_bytes"));
    }

    #[test]
    fn api_config_validate_rejects_oversized_max_response_bytes() {
        let config = ApiConfig {
            max_response_bytes: MAX_MAX_RESPONSE_BYTES + 1,
            ..ApiConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "max_response_bytes above cap should fail validation");
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn api_config_validate_rejects_empty_user_agent() {
        let config = ApiConfig {
            user_agent: "  ".to_string(),
            ..ApiConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "blank user_agent should fail validation");
        assert!(result.unwrap_err().to_string().contains("user_agent"));
    }

    #[test]
    fn api_config_validate_rejects_overlong_user_agent() {
        let config = ApiConfig {
            user_agent: "a".repeat(MAX_USER_AGENT_LENGTH + 1),
            ..ApiConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "overlong user_agent should fail validation");
        assert!(result.unwrap_err().to_string().contains("user_agent"));
    }

    #[test]
    fn api_config_timeout_converts_milliseconds() {
        let config = ApiConfig {
            timeout_ms: 2_500,
            ..ApiConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_millis(2_500));
    }

    #[test]
    fn api_config_has_base_url_ignores_whitespace() {
        let config = ApiConfig {
            base_url: "   ".to_string(),
            ..ApiConfig::default()
        };
        assert!(!config.has_base_url(), "whitespace-only base_url counts as unconfigured");
    }

    // ============================================================================
    // SECTION: SessionConfig::validate() Tests
    // ============================================================================

    #[test]
    fn session_config_validate_accepts_default() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok(), "default SessionConfig should pass validation");
    }

    #[test]
    fn session_config_validate_rejects_empty_path() {
        let config = SessionConfig {
            path: "  ".to_string(),
            ..SessionConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "blank session path should fail validation");
        assert!(result.unwrap_err().to_string().contains("session.path"));
    }

    #[test]
    fn session_config_validate_rejects_empty_cookie_name() {
        let config = SessionConfig {
            cookie_name: String::new(),
            ..SessionConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "empty cookie_name should fail validation");
        assert!(result.unwrap_err().to_string().contains("cookie_name"));
    }

    #[test]
    fn session_config_validate_rejects_cookie_name_with_separators() {
        for cookie_name in ["portal session", "portal;session", "portal=session", "portal,id"] {
            let config = SessionConfig {
                cookie_name: cookie_name.to_string(),
                ..SessionConfig::default()
            };
            let result = config.validate();
            assert!(result.is_err(), "cookie name {cookie_name:?} should fail validation");
            assert!(result.unwrap_err().to_string().contains("invalid characters"));
        }
    }

    #[test]
    fn session_config_validate_rejects_overlong_cookie_name() {
        let config = SessionConfig {
            cookie_name: "c".repeat(MAX_COOKIE_NAME_LENGTH + 1),
            ..SessionConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err(), "overlong cookie_name should fail validation");
        assert!(result.unwrap_err().to_string().contains("max length"));
    }

    #[test]
    fn session_config_validate_accepts_token_characters() {
        let config = SessionConfig {
            cookie_name: "portal_session-v2.next".to_string(),
            ..SessionConfig::default()
        };
        assert!(config.validate().is_ok(), "RFC 6265 token characters should pass validation");
    }

    // ============================================================================
    // SECTION: ExamConfig::validate() Tests
    // ============================================================================

    #[test]
    fn exam_config_validate_accepts_default() {
        let config = ExamConfig::default();
        assert!(config.validate().is_ok(), "default ExamConfig should pass validation");
        assert_eq!(config.passing_score, DEFAULT_PASSING_SCORE);
    }

    #[test]
    fn exam_config_validate_accepts_bounds() {
        for passing_score in [0, DEFAULT_PASSING_SCORE, MAX_PASSING_SCORE] {
            let config = ExamConfig {
                passing_score,
            };
            assert!(config.validate().is_ok(), "passing score {passing_score} should be valid");
        }
    }

    #[test]
    fn exam_config_validate_rejects_above_maximum() {
        let config = ExamConfig {
            passing_score: MAX_PASSING_SCORE + 1,
        };
        let result = config.validate();
        assert!(result.is_err(), "passing score above {MAX_PASSING_SCORE} should fail");
        assert!(result.unwrap_err().to_string().contains("passing_score"));
    }

    // ============================================================================
    // SECTION: Path Helper Tests
    // ============================================================================

    #[test]
    fn validate_path_string_accepts_valid_path() {
        let result = validate_path_string("session.path", "sessions/portal.toml");
        assert!(result.is_ok(), "normal relative path should pass validation");
    }

    #[test]
    fn validate_path_string_rejects_empty_string() {
        let result = validate_path_string("session.path", "");
        assert!(result.is_err(), "empty path should fail validation");
    }

    #[test]
    fn validate_path_string_rejects_whitespace_only() {
        let result = validate_path_string("session.path", "   ");
        assert!(result.is_err(), "whitespace-only path should fail validation");
    }

    #[test]
    fn validate_path_string_rejects_exceeds_max_length() {
        let value = "a".repeat(MAX_TOTAL_PATH_LENGTH + 1);
        let result = validate_path_string("session.path", &value);
        assert!(result.is_err(), "overlong path should fail validation");
    }

    #[test]
    fn validate_path_string_rejects_overlong_component() {
        let value = format!("dir/{}", "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1));
        let result = validate_path_string("session.path", &value);
        assert!(result.is_err(), "overlong path component should fail validation");
    }

    // ============================================================================
    // SECTION: Cookie Token Tests
    // ============================================================================

    #[test]
    fn cookie_token_bytes_match_rfc6265() {
        for byte in [b'a', b'Z', b'0', b'_', b'-', b'.', b'~'] {
            assert!(is_cookie_token_byte(byte), "byte {byte} should be a token byte");
        }
        for byte in [b' ', b';', b'=', b',', b'"', b'(', b')', b'@', b'[', b']'] {
            assert!(!is_cookie_token_byte(byte), "byte {byte} should not be a token byte");
        }
    }
}
