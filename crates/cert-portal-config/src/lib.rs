// crates/cert-portal-config/src/lib.rs
// ============================================================================
// Module: Cert Portal Config Library
// Description: Canonical config model, validation, and example generation.
// Purpose: Single source of truth for cert-portal.toml semantics.
// Dependencies: cert-portal-core, serde, toml
// ============================================================================

//! ## Overview
//! `cert-portal-config` defines the canonical configuration model for the
//! portal client. It provides strict, fail-closed validation and a
//! deterministic example generator. Config inputs are untrusted; loading
//! enforces hard size and path limits before parsing.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
