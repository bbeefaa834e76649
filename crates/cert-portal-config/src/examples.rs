// crates/cert-portal-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical examples for Cert Portal configuration. Outputs are
//! deterministic and kept in sync with the config model.

/// Returns a canonical example `cert-portal.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[api]
base_url = "https://portal.example.org"
timeout_ms = 10000
max_response_bytes = 1048576
user_agent = "cert-portal/0.1"
# allow_http = false

[session]
path = "cert-portal-session.toml"
cookie_name = "portal_session"

[exam]
passing_score = 70
"#,
    )
}
