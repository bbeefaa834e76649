// crates/cert-portal-core/src/guard.rs
// ============================================================================
// Module: Cert Portal Route Guard
// Description: Role-based access decision for protected views.
// Purpose: Provide the single fail-closed authority consulted before
// rendering any gated view.
// Dependencies: crate::model::{role, user}, serde
// ============================================================================

//! ## Overview
//! The route guard is a pure, total decision over the session state and the
//! roles a view requires. Callers resolve the session first (the backend's
//! current-user endpoint) and then consult the guard; while resolution is in
//! flight the guard reports a loading placeholder rather than redirecting.
//! The decision is fail-closed: an unexpected role or an absent user never
//! renders a protected view.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::model::role::Role;
use crate::model::user::User;

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Route users are sent to when authentication is required.
pub const LOGIN_ROUTE: &str = "/login";
/// Route users are sent to when their role is not accepted.
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";

// ============================================================================
// SECTION: Session State
// ============================================================================

/// Resolved authentication state for the current session.
///
/// # Invariants
/// - `Loading` is transient: callers move to `Anonymous` or `Authenticated`
///   once the backend's current-user request settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Session resolution is still in flight.
    Loading,
    /// No authenticated user is attached to the session.
    Anonymous,
    /// A backend-confirmed user is attached to the session.
    Authenticated {
        /// Resolved user record.
        user: User,
    },
}

impl SessionState {
    /// Returns the authenticated user, if resolution produced one.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated {
                user,
            } => Some(user),
            Self::Loading | Self::Anonymous => None,
        }
    }

    /// Returns the session role, if an authenticated user is attached.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self.user() {
            Some(user) => Some(user.role),
            None => None,
        }
    }
}

// ============================================================================
// SECTION: Guard Decision
// ============================================================================

/// Outcome of a route guard consultation.
///
/// # Invariants
/// - Variants are stable for serialization and audit matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    /// Render the requested view.
    Allow,
    /// Render a neutral placeholder; session resolution is in flight.
    Loading,
    /// Redirect to the login route.
    RedirectLogin,
    /// Redirect to the unauthorized route.
    RedirectUnauthorized,
}

impl GuardDecision {
    /// Returns the stable audit label for the decision.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Loading => "loading",
            Self::RedirectLogin => "redirect_login",
            Self::RedirectUnauthorized => "redirect_unauthorized",
        }
    }

    /// Returns the redirect target for redirect decisions.
    #[must_use]
    pub const fn target_route(self) -> Option<&'static str> {
        match self {
            Self::RedirectLogin => Some(LOGIN_ROUTE),
            Self::RedirectUnauthorized => Some(UNAUTHORIZED_ROUTE),
            Self::Allow | Self::Loading => None,
        }
    }

    /// Returns true when the view may be rendered.
    #[must_use]
    pub const fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides whether a view may render for the given session.
///
/// `required` lists the roles accepted by the view. An empty list marks a
/// view that only requires authentication; any confirmed user may enter.
/// Views with role requirements send unconfirmed sessions to the
/// unauthorized route rather than the login route, matching the platform's
/// established redirect behavior.
#[must_use]
pub fn decide_route(required: &[Role], session: &SessionState) -> GuardDecision {
    match session {
        SessionState::Loading => GuardDecision::Loading,
        SessionState::Anonymous => {
            if required.is_empty() {
                GuardDecision::RedirectLogin
            } else {
                GuardDecision::RedirectUnauthorized
            }
        }
        SessionState::Authenticated {
            user,
        } => {
            if required.is_empty() || required.contains(&user.role) {
                GuardDecision::Allow
            } else {
                GuardDecision::RedirectUnauthorized
            }
        }
    }
}

// ============================================================================
// SECTION: Access Audit
// ============================================================================

/// Access audit event payload.
#[derive(Debug, Serialize)]
pub struct AccessAuditEvent {
    /// Event identifier.
    event: &'static str,
    /// Guard decision label.
    decision: &'static str,
    /// Protected view name.
    view: String,
    /// Roles the view accepts.
    required_roles: Vec<Role>,
    /// Session role (when an authenticated user is attached).
    role: Option<Role>,
    /// Redirect target (for redirect decisions).
    target: Option<&'static str>,
}

impl AccessAuditEvent {
    /// Builds an audit event for a guard consultation.
    #[must_use]
    pub fn from_decision(
        view: &str,
        required: &[Role],
        session: &SessionState,
        decision: GuardDecision,
    ) -> Self {
        Self {
            event: "portal_route_guard",
            decision: decision.as_str(),
            view: view.to_string(),
            required_roles: required.to_vec(),
            role: session.role(),
            target: decision.target_route(),
        }
    }

    /// Returns the guard decision label carried by the event.
    #[must_use]
    pub const fn decision_label(&self) -> &'static str {
        self.decision
    }
}

/// Audit sink for guard decisions.
pub trait AccessAuditSink: Send + Sync {
    /// Record a guard audit event.
    fn record(&self, event: &AccessAuditEvent);
}

/// No-op audit sink for tests.
pub struct NoopAccessAuditSink;

impl AccessAuditSink for NoopAccessAuditSink {
    fn record(&self, _event: &AccessAuditEvent) {}
}

/// Decides view access and records the outcome on the audit sink.
pub fn guard_view(
    view: &str,
    required: &[Role],
    session: &SessionState,
    sink: &dyn AccessAuditSink,
) -> GuardDecision {
    let decision = decide_route(required, session);
    sink.record(&AccessAuditEvent::from_decision(view, required, session, decision));
    decision
}
