// crates/cert-portal-core/src/lib.rs
// ============================================================================
// Module: Cert Portal Core Library
// Description: Public API surface for the Cert Portal core.
// Purpose: Expose domain types, access decisions, exam logic, and form checks.
// Dependencies: crate::{model, guard, exam, forms}
// ============================================================================

//! ## Overview
//! Cert Portal core provides the certification platform's domain model, the
//! role-based view access decision, exam answer collection with local demo
//! scoring, and public form validation. It is transport-agnostic and performs
//! no I/O; the API client and CLI crates build on these types.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod exam;
pub mod forms;
pub mod guard;
pub mod model;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use exam::AnswerKey;
pub use exam::DEFAULT_PASSING_SCORE;
pub use exam::ExamError;
pub use exam::ExamScore;
pub use exam::ExamSession;
pub use exam::score_sheet;
pub use forms::ContactForm;
pub use forms::FormError;
pub use forms::FormErrors;
pub use forms::RegistrationForm;
pub use guard::AccessAuditEvent;
pub use guard::AccessAuditSink;
pub use guard::GuardDecision;
pub use guard::LOGIN_ROUTE;
pub use guard::NoopAccessAuditSink;
pub use guard::SessionState;
pub use guard::UNAUTHORIZED_ROUTE;
pub use guard::decide_route;
pub use guard::guard_view;
pub use model::ALL_ROLES;
pub use model::Answer;
pub use model::AsesorProfile;
pub use model::CertificationScheme;
pub use model::ExamStatus;
pub use model::Examination;
pub use model::ExaminationTemplate;
pub use model::Partner;
pub use model::Province;
pub use model::Question;
pub use model::QuestionOption;
pub use model::Role;
pub use model::Schedule;
pub use model::User;
pub use model::identifiers::ApplicationId;
pub use model::identifiers::AsesorId;
pub use model::identifiers::ExaminationId;
pub use model::identifiers::PartnerId;
pub use model::identifiers::ProvinceId;
pub use model::identifiers::QuestionId;
pub use model::identifiers::ScheduleId;
pub use model::identifiers::SchemeId;
pub use model::identifiers::TemplateId;
pub use model::identifiers::UserId;
