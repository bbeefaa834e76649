// crates/cert-portal-core/src/model/examination.rs
// ============================================================================
// Module: Cert Portal Examination Records
// Description: Examinations, templates, questions, and answer slots.
// Purpose: Mirror the backend's exam wire forms and status lifecycle.
// Dependencies: crate::model::identifiers, serde
// ============================================================================

//! ## Overview
//! Examination records are owned by the backend. The client observes status
//! transitions but never drives them: submitting answers and requesting
//! evaluation are backend operations, and the evaluated score fields stay
//! absent until the backend fills them in.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::model::identifiers::ApplicationId;
use crate::model::identifiers::ExaminationId;
use crate::model::identifiers::QuestionId;
use crate::model::identifiers::SchemeId;
use crate::model::identifiers::TemplateId;

// ============================================================================
// SECTION: Exam Status
// ============================================================================

/// Examination lifecycle status.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
/// - Transitions move forward along `pending -> in_progress -> completed ->
///   evaluated`; the backend owns all transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    /// Examination exists but the candidate has not started.
    Pending,
    /// Candidate is answering questions.
    InProgress,
    /// Answer sheet is submitted and awaiting evaluation.
    Completed,
    /// Backend evaluation has produced a score.
    Evaluated,
}

impl ExamStatus {
    /// Returns the stable wire label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Evaluated => "evaluated",
        }
    }

    /// Returns the position of the status along the linear lifecycle.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
            Self::Evaluated => 3,
        }
    }

    /// Returns true when an observed transition does not move backwards.
    ///
    /// The backend owns transitions; this check only classifies observed
    /// histories. Repeating the same status is valid (idempotent reads), and
    /// forward skips are valid (the backend may auto-start or auto-submit).
    #[must_use]
    pub const fn is_valid_transition(from: Self, to: Self) -> bool {
        to.rank() >= from.rank()
    }

    /// Returns true when the examination accepts answer updates.
    #[must_use]
    pub const fn accepts_answers(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// Returns true when the lifecycle has reached its final state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Evaluated)
    }
}

// ============================================================================
// SECTION: Examination Records
// ============================================================================

/// Examination instance assigned to a certification application.
///
/// # Invariants
/// - `score`, `passed`, and `correct_answers` are absent until the backend
///   evaluates the examination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Examination {
    /// Examination identifier.
    pub id: ExaminationId,
    /// Template the examination was instantiated from.
    pub template_id: TemplateId,
    /// Application the examination belongs to.
    pub application_id: ApplicationId,
    /// Lifecycle status.
    pub status: ExamStatus,
    /// Evaluated score in percent (0-100).
    pub score: Option<u32>,
    /// Pass verdict derived by the backend.
    pub passed: Option<bool>,
    /// Number of correctly answered questions.
    pub correct_answers: Option<u32>,
    /// Total number of questions on the exam.
    #[serde(default)]
    pub total_questions: u32,
    /// Saved answer sheet, in question order.
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Examination {
    /// Returns true when the backend has produced a final verdict.
    #[must_use]
    pub const fn is_evaluated(&self) -> bool {
        self.status.is_terminal()
    }
}

// ============================================================================
// SECTION: Answer Slots
// ============================================================================

/// A single answer slot on an exam sheet.
///
/// # Invariants
/// - A sheet carries at most one slot per question identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Question the slot belongs to.
    pub question_id: QuestionId,
    /// Selected option key.
    pub answer: String,
}

// ============================================================================
// SECTION: Template Records
// ============================================================================

/// Multiple-choice option on a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    /// Stable option key submitted as the answer value.
    pub key: String,
    /// Option label shown to the candidate.
    pub label: String,
}

/// Multiple-choice exam question.
///
/// # Invariants
/// - Option keys are unique within a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Question identifier.
    pub id: QuestionId,
    /// Question text.
    pub text: String,
    /// Selectable options in display order.
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// Returns true when the given value matches one of the option keys.
    #[must_use]
    pub fn has_option(&self, key: &str) -> bool {
        self.options.iter().any(|option| option.key == key)
    }
}

/// Examination template with its ordered question list.
///
/// # Invariants
/// - Question identifiers are unique within a template.
/// - `passing_score` is a percentage (0-100); the platform default is 70.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaminationTemplate {
    /// Template identifier.
    pub id: TemplateId,
    /// Template display name.
    pub name: String,
    /// Scheme the template examines (absent for generic templates).
    pub scheme_id: Option<SchemeId>,
    /// Time allowance in minutes.
    pub duration_minutes: u32,
    /// Minimum score in percent required to pass.
    pub passing_score: u32,
    /// Ordered question list.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl ExaminationTemplate {
    /// Returns the question with the given identifier, if present.
    #[must_use]
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }
}
