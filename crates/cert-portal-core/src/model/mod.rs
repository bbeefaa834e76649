// crates/cert-portal-core/src/model/mod.rs
// ============================================================================
// Module: Cert Portal Domain Types
// Description: Canonical certification platform records and identifiers.
// Purpose: Provide stable, serializable types mirroring the backend wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Domain types mirror the backend REST API's JSON records. Object keys on
//! the wire are camelCase; enums use stable snake_case labels. All records
//! must be treated as untrusted on deserialization and carry no client-side
//! authority beyond what their documented invariants state.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod directory;
pub mod examination;
pub mod identifiers;
pub mod role;
pub mod scheme;
pub mod user;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use directory::AsesorProfile;
pub use directory::Partner;
pub use directory::Province;
pub use directory::Schedule;
pub use examination::Answer;
pub use examination::ExamStatus;
pub use examination::Examination;
pub use examination::ExaminationTemplate;
pub use examination::Question;
pub use examination::QuestionOption;
pub use identifiers::ApplicationId;
pub use identifiers::AsesorId;
pub use identifiers::ExaminationId;
pub use identifiers::PartnerId;
pub use identifiers::ProvinceId;
pub use identifiers::QuestionId;
pub use identifiers::ScheduleId;
pub use identifiers::SchemeId;
pub use identifiers::TemplateId;
pub use identifiers::UserId;
pub use role::ALL_ROLES;
pub use role::Role;
pub use scheme::CertificationScheme;
pub use user::User;
