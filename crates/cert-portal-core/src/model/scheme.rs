// crates/cert-portal-core/src/model/scheme.rs
// ============================================================================
// Module: Cert Portal Certification Schemes
// Description: Certification scheme catalog records.
// Purpose: Mirror the backend's scheme wire form for browsing and detail pages.
// Dependencies: crate::model::identifiers, serde
// ============================================================================

//! ## Overview
//! Certification schemes are the platform's public catalog. Each scheme is
//! addressable by a URL slug and grouped by a backend-defined category label;
//! `icon` and `icon_background` are presentation hints passed through
//! untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::model::identifiers::SchemeId;

// ============================================================================
// SECTION: Scheme Records
// ============================================================================

/// Certification scheme catalog entry.
///
/// # Invariants
/// - `slug` is unique per scheme and stable across catalog reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationScheme {
    /// Scheme identifier.
    pub id: SchemeId,
    /// URL slug used for detail routes.
    pub slug: String,
    /// Scheme display name.
    pub name: String,
    /// Scheme description.
    pub description: String,
    /// Backend-defined category label.
    pub category: String,
    /// Icon name presentation hint.
    pub icon: String,
    /// Icon background presentation hint.
    pub icon_background: String,
}

impl CertificationScheme {
    /// Returns true when the scheme carries the given category label.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}
