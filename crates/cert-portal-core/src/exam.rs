// crates/cert-portal-core/src/exam.rs
// ============================================================================
// Module: Cert Portal Exam Session
// Description: Answer sheet collection and local demo scoring.
// Purpose: Keep one mutable answer slot per question until submission and
// score practice sheets without backend involvement.
// Dependencies: crate::model::examination, crate::model::identifiers,
// serde, thiserror
// ============================================================================

//! ## Overview
//! An [`ExamSession`] collects answers for an ordered question list: one
//! slot per question, overwritable until the sheet is submitted. Scoring
//! authority for real examinations belongs to the backend's evaluate
//! operation; [`score_sheet`] exists for the offline practice flow and
//! mirrors the backend's arithmetic (percentage rounded half-up, pass at the
//! template's passing score).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::model::examination::Answer;
use crate::model::examination::ExaminationTemplate;
use crate::model::identifiers::QuestionId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Platform default passing score in percent.
pub const DEFAULT_PASSING_SCORE: u32 = 70;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by exam session and scoring operations.
#[derive(Debug, Error)]
pub enum ExamError {
    /// A question identifier appears more than once.
    #[error("duplicate question id: {question_id}")]
    DuplicateQuestion {
        /// Offending question identifier.
        question_id: QuestionId,
    },
    /// An answer references a question that is not on the exam.
    #[error("unknown question id: {question_id}")]
    UnknownQuestion {
        /// Offending question identifier.
        question_id: QuestionId,
    },
    /// The sheet is frozen; answers can no longer change.
    #[error("answer sheet already submitted")]
    AlreadySubmitted,
}

// ============================================================================
// SECTION: Exam Session
// ============================================================================

/// Mutable answer sheet for one examination attempt.
///
/// # Invariants
/// - Exactly one slot per question identifier, in question order.
/// - Slots are overwritable until [`ExamSession::submit`] freezes the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSession {
    /// Question identifiers in display order.
    questions: Vec<QuestionId>,
    /// Selected option key per slot, parallel to `questions`.
    choices: Vec<Option<String>>,
    /// Set once the sheet is submitted.
    submitted: bool,
}

impl ExamSession {
    /// Creates a session over an ordered question list.
    ///
    /// # Errors
    /// Returns [`ExamError::DuplicateQuestion`] when a question identifier
    /// repeats.
    pub fn new(questions: Vec<QuestionId>) -> Result<Self, ExamError> {
        for (index, question_id) in questions.iter().enumerate() {
            if questions[..index].contains(question_id) {
                return Err(ExamError::DuplicateQuestion {
                    question_id: question_id.clone(),
                });
            }
        }
        let choices = vec![None; questions.len()];
        Ok(Self {
            questions,
            choices,
            submitted: false,
        })
    }

    /// Creates a session over a template's question list.
    ///
    /// # Errors
    /// Returns [`ExamError::DuplicateQuestion`] when the template repeats a
    /// question identifier.
    pub fn from_template(template: &ExaminationTemplate) -> Result<Self, ExamError> {
        Self::new(template.questions.iter().map(|question| question.id.clone()).collect())
    }

    /// Creates a session and restores previously saved answers.
    ///
    /// Saved slots for unknown questions are rejected; the backend sheet
    /// must match the template's question list.
    ///
    /// # Errors
    /// Returns [`ExamError::DuplicateQuestion`] for repeated questions and
    /// [`ExamError::UnknownQuestion`] for saved answers off the sheet.
    pub fn restore(questions: Vec<QuestionId>, saved: &[Answer]) -> Result<Self, ExamError> {
        let mut session = Self::new(questions)?;
        for answer in saved {
            session.record(&answer.question_id, answer.answer.clone())?;
        }
        Ok(session)
    }

    /// Records or overwrites the answer for a question.
    ///
    /// # Errors
    /// Returns [`ExamError::AlreadySubmitted`] once the sheet is frozen and
    /// [`ExamError::UnknownQuestion`] for identifiers off the sheet.
    pub fn record(
        &mut self,
        question_id: &QuestionId,
        choice: impl Into<String>,
    ) -> Result<(), ExamError> {
        if self.submitted {
            return Err(ExamError::AlreadySubmitted);
        }
        let index = self.slot_index(question_id)?;
        self.choices[index] = Some(choice.into());
        Ok(())
    }

    /// Clears the answer for a question.
    ///
    /// # Errors
    /// Returns [`ExamError::AlreadySubmitted`] once the sheet is frozen and
    /// [`ExamError::UnknownQuestion`] for identifiers off the sheet.
    pub fn clear(&mut self, question_id: &QuestionId) -> Result<(), ExamError> {
        if self.submitted {
            return Err(ExamError::AlreadySubmitted);
        }
        let index = self.slot_index(question_id)?;
        self.choices[index] = None;
        Ok(())
    }

    /// Returns the recorded answer for a question, if any.
    #[must_use]
    pub fn answer_for(&self, question_id: &QuestionId) -> Option<&str> {
        let index = self.questions.iter().position(|candidate| candidate == question_id)?;
        self.choices[index].as_deref()
    }

    /// Returns the number of answered slots.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.choices.iter().filter(|choice| choice.is_some()).count()
    }

    /// Returns the total number of questions on the sheet.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Returns true when every slot carries an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answered_count() == self.total_questions()
    }

    /// Returns true when the sheet has been submitted.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Returns the answered slots as a wire sheet, in question order.
    #[must_use]
    pub fn answers(&self) -> Vec<Answer> {
        self.questions
            .iter()
            .zip(&self.choices)
            .filter_map(|(question_id, choice)| {
                choice.as_ref().map(|answer| Answer {
                    question_id: question_id.clone(),
                    answer: answer.clone(),
                })
            })
            .collect()
    }

    /// Freezes the sheet and returns the final ordered answers.
    ///
    /// # Errors
    /// Returns [`ExamError::AlreadySubmitted`] when called twice.
    pub fn submit(&mut self) -> Result<Vec<Answer>, ExamError> {
        if self.submitted {
            return Err(ExamError::AlreadySubmitted);
        }
        self.submitted = true;
        Ok(self.answers())
    }

    /// Locates the slot index for a question identifier.
    fn slot_index(&self, question_id: &QuestionId) -> Result<usize, ExamError> {
        self.questions.iter().position(|candidate| candidate == question_id).ok_or_else(|| {
            ExamError::UnknownQuestion {
                question_id: question_id.clone(),
            }
        })
    }
}

// ============================================================================
// SECTION: Answer Keys
// ============================================================================

/// Correct option key per question, used by the offline practice scorer.
///
/// # Invariants
/// - At most one entry per question identifier.
/// - Keys never leave the local machine; real exams are evaluated server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerKey(BTreeMap<QuestionId, String>);

impl AnswerKey {
    /// Builds a key from question/option pairs.
    ///
    /// # Errors
    /// Returns [`ExamError::DuplicateQuestion`] when a question identifier
    /// repeats.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (QuestionId, String)>,
    ) -> Result<Self, ExamError> {
        let mut entries = BTreeMap::new();
        for (question_id, answer) in pairs {
            if entries.insert(question_id.clone(), answer).is_some() {
                return Err(ExamError::DuplicateQuestion {
                    question_id,
                });
            }
        }
        Ok(Self(entries))
    }

    /// Returns the correct option key for a question, if known.
    #[must_use]
    pub fn correct_answer(&self, question_id: &QuestionId) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    /// Returns the number of keyed questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the key holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over keyed questions in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &str)> {
        self.0.iter().map(|(question_id, answer)| (question_id, answer.as_str()))
    }
}

// ============================================================================
// SECTION: Scoring
// ============================================================================

/// Scored outcome for one answer sheet.
///
/// # Invariants
/// - `score` is a percentage in 0-100, rounded half-up.
/// - `passed` holds exactly when `score >= passing_score` and the sheet has
///   at least one keyed question; an empty exam never passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamScore {
    /// Number of answers matching the key.
    pub correct_answers: u32,
    /// Total number of keyed questions.
    pub total_questions: u32,
    /// Percentage score rounded half-up.
    pub score: u32,
    /// Pass verdict against the passing score.
    pub passed: bool,
}

/// Scores an answer sheet against an answer key.
///
/// Each keyed question counts once: a sheet slot matches when its selected
/// option equals the key's option for that question. Unanswered and
/// off-sheet slots count as incorrect. An empty key scores zero and does
/// not pass.
#[must_use]
pub fn score_sheet(sheet: &[Answer], key: &AnswerKey, passing_score: u32) -> ExamScore {
    let mut correct: u32 = 0;
    for (question_id, expected) in key.iter() {
        let matched = sheet
            .iter()
            .find(|answer| &answer.question_id == question_id)
            .is_some_and(|answer| answer.answer == expected);
        if matched {
            correct = correct.saturating_add(1);
        }
    }
    let total = u32::try_from(key.len()).unwrap_or(u32::MAX);
    let score = percentage_rounded_half_up(correct, total);
    ExamScore {
        correct_answers: correct,
        total_questions: total,
        score,
        passed: total > 0 && score >= passing_score,
    }
}

/// Computes `round(100 * correct / total)` with half-up integer rounding.
fn percentage_rounded_half_up(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let numerator = 200 * u64::from(correct) + u64::from(total);
    let denominator = 2 * u64::from(total);
    u32::try_from(numerator / denominator).unwrap_or(u32::MAX)
}
