//! Config defaults and core validation tests for cert-portal-config.
// crates/cert-portal-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults and Core Validation Tests
// Description: Validate default behavior and core config invariants.
// Purpose: Ensure minimal config is valid and critical invariants are enforced.
// =============================================================================

use cert_portal_config::CertPortalConfig;
use cert_portal_config::ConfigError;
use cert_portal_config::config_toml_example;
use cert_portal_core::DEFAULT_PASSING_SCORE;

mod common;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn default_config_validates() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn minimal_config_applies_documented_defaults() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    if !config.api.base_url.is_empty() {
        return Err("api.base_url should default to empty".to_string());
    }
    if config.api.allow_http {
        return Err("api.allow_http should default to false".to_string());
    }
    if config.api.timeout_ms != 10_000 {
        return Err("api.timeout_ms should default to 10000".to_string());
    }
    if config.api.max_response_bytes != 1_048_576 {
        return Err("api.max_response_bytes should default to 1 MiB".to_string());
    }
    if config.api.user_agent != "cert-portal/0.1" {
        return Err("api.user_agent should default to cert-portal/0.1".to_string());
    }
    if config.session.path != "cert-portal-session.toml" {
        return Err("session.path should default to cert-portal-session.toml".to_string());
    }
    if config.session.cookie_name != "portal_session" {
        return Err("session.cookie_name should default to portal_session".to_string());
    }
    if config.exam.passing_score != DEFAULT_PASSING_SCORE {
        return Err("exam.passing_score should default to the shared threshold".to_string());
    }
    Ok(())
}

#[test]
fn partial_section_keeps_remaining_defaults() -> TestResult {
    let config = common::config_from_toml("[api]\nbase_url = \"https://portal.example.org\"\n")
        .map_err(|err| err.to_string())?;
    if config.api.timeout_ms != 10_000 {
        return Err("unset api.timeout_ms should keep its default".to_string());
    }
    if config.session.cookie_name != "portal_session" {
        return Err("absent [session] section should keep its defaults".to_string());
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn example_config_parses_and_validates() -> TestResult {
    let example = config_toml_example();
    let config: CertPortalConfig = toml::from_str(&example).map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.api.base_url != "https://portal.example.org" {
        return Err("example base_url should match the documented endpoint".to_string());
    }
    if config.exam.passing_score != DEFAULT_PASSING_SCORE {
        return Err("example passing_score should match the shared threshold".to_string());
    }
    Ok(())
}

#[test]
fn http_base_url_requires_allow_http() -> TestResult {
    let config =
        common::config_with_base_url("http://localhost:8000").map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "allow_http")?;
    Ok(())
}

#[test]
fn cookie_name_rejects_separator_characters() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.session.cookie_name = "portal;session".to_string();
    assert_invalid(config.validate(), "session.cookie_name")?;
    Ok(())
}

#[test]
fn passing_score_rejects_values_above_one_hundred() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.exam.passing_score = 101;
    assert_invalid(config.validate(), "exam.passing_score")?;
    Ok(())
}
