// crates/cert-portal-core/tests/forms.rs
// ============================================================================
// Module: Public Form Validation Tests
// Description: Tests for registration and contact form checks.
// Purpose: Ensure malformed submissions are rejected field by field before
// any network call.
// Dependencies: cert-portal-core
// ============================================================================
//! ## Overview
//! Validation collects every failing field in one pass so the frontend can
//! mark individual inputs. These tests cover the accept path and each
//! rejection class for both public forms.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use cert_portal_core::ContactForm;
use cert_portal_core::FormError;
use cert_portal_core::RegistrationForm;
use cert_portal_core::SchemeId;

fn valid_registration() -> RegistrationForm {
    RegistrationForm {
        full_name: "Rina Wijaya".to_string(),
        email: "rina@example.com".to_string(),
        phone: "+6281234567890".to_string(),
        scheme_id: SchemeId::new("scheme-1"),
        province_id: None,
        schedule_id: None,
    }
}

fn valid_contact() -> ContactForm {
    ContactForm {
        name: "Budi Santoso".to_string(),
        email: "budi@example.com".to_string(),
        subject: Some("Schedule question".to_string()),
        message: "When does the next assessment window open?".to_string(),
    }
}

/// A well-formed registration passes validation.
#[test]
fn valid_registration_passes() {
    assert!(valid_registration().validate().is_ok());
}

/// Blank required fields are reported together, not one at a time.
#[test]
fn blank_registration_reports_every_field() {
    let form = RegistrationForm {
        full_name: "  ".to_string(),
        email: String::new(),
        phone: String::new(),
        scheme_id: SchemeId::new(""),
        province_id: None,
        schedule_id: None,
    };
    let errors = form.validate().expect_err("blank form must fail");
    let fields: Vec<&str> = errors.errors().iter().map(FormError::field).collect();
    assert_eq!(fields, vec!["fullName", "email", "phone", "schemeId"]);
}

/// Malformed email addresses are rejected.
#[test]
fn malformed_emails_are_rejected() {
    for bad in ["plain", "no@tld", "two@@example.com", "white space@example.com", "@example.com"] {
        let mut form = valid_registration();
        form.email = bad.to_string();
        let errors = form.validate().expect_err("malformed email must fail");
        assert!(
            errors.errors().iter().any(|error| matches!(
                error,
                FormError::InvalidEmail { field: "email" }
            )),
            "expected email rejection for {bad:?}"
        );
    }
}

/// Phone numbers must be 8-15 digits with an optional leading plus.
#[test]
fn phone_shape_is_enforced() {
    let accepted = ["+6281234567890", "08123456789", "12345678"];
    for good in accepted {
        let mut form = valid_registration();
        form.phone = good.to_string();
        assert!(form.validate().is_ok(), "expected {good:?} to be accepted");
    }

    let rejected = ["1234567", "1234567890123456", "+62-812-3456", "phone", "+"];
    for bad in rejected {
        let mut form = valid_registration();
        form.phone = bad.to_string();
        let errors = form.validate().expect_err("malformed phone must fail");
        assert!(
            errors.errors().iter().any(|error| matches!(
                error,
                FormError::InvalidPhone { field: "phone" }
            )),
            "expected phone rejection for {bad:?}"
        );
    }
}

/// Over-long names are rejected with the limit in the error.
#[test]
fn overlong_names_are_rejected() {
    let mut form = valid_registration();
    form.full_name = "x".repeat(201);
    let errors = form.validate().expect_err("overlong name must fail");
    assert!(errors.errors().iter().any(|error| matches!(
        error,
        FormError::TooLong { field: "fullName", limit: 200 }
    )));
}

/// A well-formed contact submission passes validation.
#[test]
fn valid_contact_passes() {
    assert!(valid_contact().validate().is_ok());
    let mut without_subject = valid_contact();
    without_subject.subject = None;
    assert!(without_subject.validate().is_ok());
}

/// Contact messages are required and capped.
#[test]
fn contact_message_is_required_and_capped() {
    let mut blank = valid_contact();
    blank.message = "\n\t".to_string();
    let errors = blank.validate().expect_err("blank message must fail");
    assert!(errors.errors().iter().any(|error| matches!(
        error,
        FormError::Required { field: "message" }
    )));

    let mut overlong = valid_contact();
    overlong.message = "x".repeat(2001);
    let errors = overlong.validate().expect_err("overlong message must fail");
    assert!(errors.errors().iter().any(|error| matches!(
        error,
        FormError::TooLong { field: "message", limit: 2000 }
    )));
}

/// Optional subjects are validated only when present.
#[test]
fn overlong_subject_is_rejected() {
    let mut form = valid_contact();
    form.subject = Some("s".repeat(201));
    let errors = form.validate().expect_err("overlong subject must fail");
    assert!(errors.errors().iter().any(|error| matches!(
        error,
        FormError::TooLong { field: "subject", limit: 200 }
    )));
}

/// Error lists render as a single joined message.
#[test]
fn form_errors_render_joined() {
    let form = ContactForm {
        name: String::new(),
        email: "bad".to_string(),
        subject: None,
        message: String::new(),
    };
    let errors = form.validate().expect_err("invalid form must fail");
    let rendered = errors.to_string();
    assert!(rendered.contains("`name` is required"));
    assert!(rendered.contains("`email` is not a valid email address"));
    assert!(rendered.contains("; "));
}
