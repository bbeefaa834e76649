// crates/cert-portal-core/src/forms.rs
// ============================================================================
// Module: Cert Portal Public Forms
// Description: Registration and contact form validation.
// Purpose: Reject malformed public submissions before they reach the network.
// Dependencies: crate::model::identifiers, serde, thiserror
// ============================================================================

//! ## Overview
//! Public forms are validated client-side so individual fields can be marked
//! before any request is sent. Validation collects every failing field
//! rather than stopping at the first; the backend revalidates on submission
//! and remains the authority.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::model::identifiers::ProvinceId;
use crate::model::identifiers::ScheduleId;
use crate::model::identifiers::SchemeId;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum length for name and subject fields.
const MAX_NAME_LEN: usize = 200;
/// Maximum length for email addresses (RFC 5321 path limit).
const MAX_EMAIL_LEN: usize = 254;
/// Maximum length for contact message bodies.
const MAX_MESSAGE_LEN: usize = 2000;
/// Minimum number of digits in a phone number.
const MIN_PHONE_DIGITS: usize = 8;
/// Maximum number of digits in a phone number (E.164).
const MAX_PHONE_DIGITS: usize = 15;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required field is empty.
    #[error("field `{field}` is required")]
    Required {
        /// Rejected field name.
        field: &'static str,
    },
    /// A field exceeds its length limit.
    #[error("field `{field}` exceeds {limit} characters")]
    TooLong {
        /// Rejected field name.
        field: &'static str,
        /// Maximum accepted length.
        limit: usize,
    },
    /// An email field is not a plausible address.
    #[error("field `{field}` is not a valid email address")]
    InvalidEmail {
        /// Rejected field name.
        field: &'static str,
    },
    /// A phone field is not a plausible number.
    #[error("field `{field}` is not a valid phone number")]
    InvalidPhone {
        /// Rejected field name.
        field: &'static str,
    },
}

impl FormError {
    /// Returns the rejected field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Required {
                field,
            }
            | Self::TooLong {
                field, ..
            }
            | Self::InvalidEmail {
                field,
            }
            | Self::InvalidPhone {
                field,
            } => field,
        }
    }
}

/// All rejected fields from one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct FormErrors(Vec<FormError>);

impl FormErrors {
    /// Returns the rejected fields in form order.
    #[must_use]
    pub fn errors(&self) -> &[FormError] {
        &self.0
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            error.fmt(f)?;
            first = false;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Registration Form
// ============================================================================

/// Certification registration submission.
///
/// # Invariants
/// - [`RegistrationForm::validate`] must pass before the form is posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    /// Applicant display name.
    pub full_name: String,
    /// Applicant contact email.
    pub email: String,
    /// Applicant phone number (optional leading `+`, digits only).
    pub phone: String,
    /// Scheme the applicant registers for.
    pub scheme_id: SchemeId,
    /// Optional applicant province.
    pub province_id: Option<ProvinceId>,
    /// Optional preferred schedule.
    pub schedule_id: Option<ScheduleId>,
}

impl RegistrationForm {
    /// Validates the form and collects every failing field.
    ///
    /// # Errors
    /// Returns [`FormErrors`] listing each rejected field.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = Vec::new();
        check_required_text(&mut errors, "fullName", &self.full_name, MAX_NAME_LEN);
        check_email(&mut errors, "email", &self.email);
        check_phone(&mut errors, "phone", &self.phone);
        if self.scheme_id.as_str().trim().is_empty() {
            errors.push(FormError::Required {
                field: "schemeId",
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors(errors))
        }
    }
}

// ============================================================================
// SECTION: Contact Form
// ============================================================================

/// Public contact submission.
///
/// # Invariants
/// - [`ContactForm::validate`] must pass before the form is posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    /// Sender display name.
    pub name: String,
    /// Sender contact email.
    pub email: String,
    /// Optional message subject.
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
}

impl ContactForm {
    /// Validates the form and collects every failing field.
    ///
    /// # Errors
    /// Returns [`FormErrors`] listing each rejected field.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = Vec::new();
        check_required_text(&mut errors, "name", &self.name, MAX_NAME_LEN);
        check_email(&mut errors, "email", &self.email);
        if let Some(subject) = &self.subject
            && subject.chars().count() > MAX_NAME_LEN
        {
            errors.push(FormError::TooLong {
                field: "subject",
                limit: MAX_NAME_LEN,
            });
        }
        check_required_text(&mut errors, "message", &self.message, MAX_MESSAGE_LEN);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors(errors))
        }
    }
}

// ============================================================================
// SECTION: Field Checks
// ============================================================================

/// Requires non-blank text within a length limit.
fn check_required_text(
    errors: &mut Vec<FormError>,
    field: &'static str,
    value: &str,
    limit: usize,
) {
    if value.trim().is_empty() {
        errors.push(FormError::Required {
            field,
        });
    } else if value.chars().count() > limit {
        errors.push(FormError::TooLong {
            field,
            limit,
        });
    }
}

/// Requires a plausible email address.
///
/// The check is deliberately shallow: one `@`, non-empty local and domain
/// parts, a dot inside the domain, no whitespace. Deliverability is the
/// backend's problem.
fn check_email(errors: &mut Vec<FormError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FormError::Required {
            field,
        });
        return;
    }
    if value.chars().count() > MAX_EMAIL_LEN {
        errors.push(FormError::TooLong {
            field,
            limit: MAX_EMAIL_LEN,
        });
        return;
    }
    if !is_plausible_email(value) {
        errors.push(FormError::InvalidEmail {
            field,
        });
    }
}

/// Returns true for a plausibly shaped email address.
fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Requires a plausible phone number.
fn check_phone(errors: &mut Vec<FormError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FormError::Required {
            field,
        });
        return;
    }
    if !is_plausible_phone(value) {
        errors.push(FormError::InvalidPhone {
            field,
        });
    }
}

/// Returns true for an optional `+` followed by 8-15 digits.
fn is_plausible_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len())
}
