// crates/cert-portal-core/src/model/directory.rs
// ============================================================================
// Module: Cert Portal Directory Records
// Description: Partners, provinces, schedules, and assessor profiles.
// Purpose: Mirror the backend's reference-data wire forms for public browsing
// and admin management.
// Dependencies: crate::model::identifiers, serde, time
// ============================================================================

//! ## Overview
//! Directory records back the public marketing pages (partners, provinces,
//! schedules) and the admin assessor roster. Schedule dates travel as
//! RFC3339 date-only strings and are parsed lazily for ordering checks; an
//! unparseable date is reported rather than silently reordered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::Date;

use crate::model::identifiers::AsesorId;
use crate::model::identifiers::PartnerId;
use crate::model::identifiers::ProvinceId;
use crate::model::identifiers::ScheduleId;
use crate::model::identifiers::SchemeId;

// ============================================================================
// SECTION: Partner Records
// ============================================================================

/// Industry partner shown on the public landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    /// Partner identifier.
    pub id: PartnerId,
    /// Partner display name.
    pub name: String,
    /// Optional partner website URL.
    pub website: Option<String>,
}

// ============================================================================
// SECTION: Province Records
// ============================================================================

/// Province option offered on registration forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    /// Province identifier.
    pub id: ProvinceId,
    /// Province display name.
    pub name: String,
}

// ============================================================================
// SECTION: Schedule Records
// ============================================================================

/// Certification schedule window published by the platform.
///
/// # Invariants
/// - `start_date` and `end_date` are RFC3339 date-only strings (YYYY-MM-DD).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Schedule identifier.
    pub id: ScheduleId,
    /// Scheme the schedule belongs to (absent for platform-wide events).
    pub scheme_id: Option<SchemeId>,
    /// Schedule display name.
    pub name: String,
    /// First day of the window (YYYY-MM-DD).
    pub start_date: String,
    /// Last day of the window (YYYY-MM-DD).
    pub end_date: String,
    /// Optional venue or city label.
    pub location: Option<String>,
}

impl Schedule {
    /// Returns the parsed window when both dates are well-formed and ordered.
    ///
    /// Returns `None` when either date fails to parse or the window ends
    /// before it starts; callers surface such records as malformed instead
    /// of sorting on garbage.
    #[must_use]
    pub fn window(&self) -> Option<(Date, Date)> {
        let start = parse_wire_date(&self.start_date)?;
        let end = parse_wire_date(&self.end_date)?;
        if end < start {
            return None;
        }
        Some((start, end))
    }

    /// Returns true when the schedule window contains the given date.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.window().is_some_and(|(start, end)| start <= date && date <= end)
    }
}

/// Parses an RFC3339 date-only value (YYYY-MM-DD).
fn parse_wire_date(value: &str) -> Option<Date> {
    let mut parts = value.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let month = time::Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

// ============================================================================
// SECTION: Asesor Records
// ============================================================================

/// Assessor roster entry managed from the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsesorProfile {
    /// Asesor identifier.
    pub id: AsesorId,
    /// Display name.
    pub full_name: String,
    /// Contact email address.
    pub email: String,
    /// Competency field the assessor evaluates.
    pub competency: Option<String>,
    /// National assessor registration number.
    pub registration_number: Option<String>,
}
