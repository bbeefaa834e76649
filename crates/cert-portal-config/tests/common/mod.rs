// crates/cert-portal-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for cert-portal-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use cert_portal_config::CertPortalConfig;

/// Parses a TOML string into a `CertPortalConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<CertPortalConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<CertPortalConfig, toml::de::Error> {
    config_from_toml("")
}

/// Returns a minimal config pointing at the given backend base URL.
pub fn config_with_base_url(base_url: &str) -> Result<CertPortalConfig, toml::de::Error> {
    let mut config = minimal_config()?;
    config.api.base_url = base_url.to_string();
    Ok(config)
}
