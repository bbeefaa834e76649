// crates/cert-portal-cli/src/lib.rs
// ============================================================================
// Module: lib
// Description: Library surface for the Cert Portal CLI crate.
// Purpose: Expose the message catalogs and translation macro shared by the
//          binary and its tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Library half of the `cert-portal` binary. The command surface itself lives
//! in `main.rs`; this crate root exposes the localization layer so the binary
//! and integration tests can share one catalog.

pub mod i18n;
