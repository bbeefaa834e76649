// crates/cert-portal-api/src/lib.rs
// ============================================================================
// Module: Cert Portal API Library
// Description: REST client and session persistence for the portal backend.
// Purpose: Provide bounded, fail-closed HTTP access to portal endpoints.
// Dependencies: cert-portal-config, cert-portal-core, reqwest, serde, toml
// ============================================================================

//! ## Overview
//! `cert-portal-api` wraps the portal backend's REST endpoints in a typed
//! client. Requests carry the stored cookie session, never follow redirects,
//! and enforce timeout and response size limits on every call. Backend
//! failures surface as `HTTP <status>: <message>` errors without retries.
//!
//! Security posture: backend responses are untrusted; apply size limits,
//! fail closed on parsing errors, and never log session credentials.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod session;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ApiError;
pub use client::NewAsesor;
pub use client::PortalClient;
pub use client::StartExamination;
pub use session::SessionStore;
pub use session::StoredSession;
