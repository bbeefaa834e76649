// crates/cert-portal-api/src/client.rs
// ============================================================================
// Module: Portal REST Client
// Description: Typed client for the portal backend's JSON endpoints.
// Purpose: Provide bounded, cookie-authenticated access to backend resources.
// Dependencies: cert-portal-config, cert-portal-core, reqwest, serde
// ============================================================================

//! ## Overview
//! The portal client wraps every backend endpoint the frontend consumes:
//! public directory listings, account sessions, admin directory management,
//! and the examination flow. Redirects are never followed, response bodies
//! are read through a hard byte limit, and non-success statuses surface as
//! `HTTP <status>: <message>` errors with the backend's own message text.
//!
//! Security posture: backend responses are untrusted; apply size limits and
//! fail closed on parsing errors. Session cookies are never logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use cert_portal_config::CertPortalConfig;
use cert_portal_core::Answer;
use cert_portal_core::ApplicationId;
use cert_portal_core::AsesorId;
use cert_portal_core::AsesorProfile;
use cert_portal_core::CertificationScheme;
use cert_portal_core::ContactForm;
use cert_portal_core::Examination;
use cert_portal_core::ExaminationId;
use cert_portal_core::ExaminationTemplate;
use cert_portal_core::Partner;
use cert_portal_core::Province;
use cert_portal_core::RegistrationForm;
use cert_portal_core::Schedule;
use cert_portal_core::TemplateId;
use cert_portal_core::User;
use reqwest::Client;
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::COOKIE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::header::SET_COOKIE;
use reqwest::redirect::Policy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::session::StoredSession;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Portal client errors.
///
/// # Invariants
/// - Variants are stable for CLI error mapping and tests.
/// - [`ApiError::Status`] renders as `HTTP <status>: <message>` with the
///   backend's own message text; this shape is relied upon by display code.
/// - String payloads may include untrusted backend text.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration error.
    #[error("api config error: {0}")]
    Config(String),
    /// Transport failure (connect, TLS, timeout).
    #[error("api transport error: {0}")]
    Transport(String),
    /// JSON serialization or parsing error.
    #[error("api json error: {0}")]
    Json(String),
    /// Session capture or persistence error.
    #[error("api session error: {0}")]
    Session(String),
    /// Non-success HTTP status reported by the backend.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend-provided message text.
        message: String,
    },
    /// Response size exceeds limits.
    #[error("api response exceeds size limit ({actual} > {limit})")]
    ResponseTooLarge {
        /// Actual size in bytes.
        actual: usize,
        /// Maximum size in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Request Payloads
// ============================================================================

/// Login request payload.
#[derive(Serialize)]
struct LoginRequest<'a> {
    /// Account username.
    username: &'a str,
    /// Account password.
    password: &'a str,
}

/// New asesor payload for the admin directory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsesor {
    /// Display name of the asesor.
    pub full_name: String,
    /// Contact email address.
    pub email: String,
    /// Optional competency or focus area.
    pub competency: Option<String>,
    /// Optional registration number assigned by the certification authority.
    pub registration_number: Option<String>,
}

/// Exam start payload referencing a published template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartExamination {
    /// Template to instantiate.
    pub template_id: TemplateId,
    /// Optional certification application the exam belongs to.
    pub application_id: Option<ApplicationId>,
}

/// Answer sheet replacement payload for exam updates.
#[derive(Serialize)]
struct AnswerSheetPatch<'a> {
    /// Full ordered answer sheet.
    answers: &'a [Answer],
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Typed client for the portal backend.
///
/// # Invariants
/// - Redirects are never followed.
/// - Every response body is read through `max_response_bytes`.
/// - The session cookie, when attached, is sent on every request.
pub struct PortalClient {
    /// Reqwest client instance.
    client: Client,
    /// Validated backend base URL.
    base: Url,
    /// Maximum response body size accepted per request.
    max_response_bytes: usize,
    /// Name of the backend session cookie.
    cookie_name: String,
    /// Attached session cookie pair (`name=value`), if any.
    session_cookie: Option<String>,
}

impl fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalClient")
            .field("base", &self.base.as_str())
            .field("max_response_bytes", &self.max_response_bytes)
            .field("cookie_name", &self.cookie_name)
            .field("session_cookie", &self.session_cookie.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl PortalClient {
    /// Creates a new portal client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the base URL is missing or invalid, or when
    /// the HTTP client cannot be constructed.
    pub fn new(config: &CertPortalConfig) -> Result<Self, ApiError> {
        let base_url = config.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ApiError::Config("api.base_url must be configured".to_string()));
        }
        let base =
            Url::parse(base_url).map_err(|_| ApiError::Config("invalid api.base_url".to_string()))?;
        match base.scheme() {
            "https" => {}
            "http" if config.api.allow_http => {}
            _ => {
                return Err(ApiError::Config("unsupported api.base_url scheme".to_string()));
            }
        }
        if !base.username().is_empty() || base.password().is_some() {
            return Err(ApiError::Config("api.base_url credentials are not allowed".to_string()));
        }
        if base.host_str().is_none() {
            return Err(ApiError::Config("api.base_url host required".to_string()));
        }
        let client = Client::builder()
            .timeout(config.api.timeout())
            .user_agent(config.api.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base,
            max_response_bytes: config.api.max_response_bytes,
            cookie_name: config.session.cookie_name.clone(),
            session_cookie: None,
        })
    }

    /// Attaches a stored session so subsequent requests are authenticated.
    pub fn attach_session(&mut self, session: &StoredSession) {
        self.session_cookie = Some(format!("{}={}", session.cookie_name, session.cookie_value));
    }

    /// Drops the attached session; subsequent requests are anonymous.
    pub fn clear_session(&mut self) {
        self.session_cookie = None;
    }

    /// Returns whether a session cookie is currently attached.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.session_cookie.is_some()
    }

    /// Returns the configured session cookie name.
    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }
}

// ============================================================================
// SECTION: Public Directory Endpoints
// ============================================================================

impl PortalClient {
    /// Fetches all published certification schemes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn schemes(&self) -> Result<Vec<CertificationScheme>, ApiError> {
        self.get_json(&["api", "schemes"]).await
    }

    /// Fetches one certification scheme by its public slug.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn scheme_by_slug(&self, slug: &str) -> Result<CertificationScheme, ApiError> {
        self.get_json(&["api", "schemes", slug]).await
    }

    /// Fetches the partner directory.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn partners(&self) -> Result<Vec<Partner>, ApiError> {
        self.get_json(&["api", "partners"]).await
    }

    /// Fetches the province directory.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn provinces(&self) -> Result<Vec<Province>, ApiError> {
        self.get_json(&["api", "provinces"]).await
    }

    /// Fetches the published assessment schedules.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn schedules(&self) -> Result<Vec<Schedule>, ApiError> {
        self.get_json(&["api", "schedules"]).await
    }
}

// ============================================================================
// SECTION: Admin Endpoints
// ============================================================================

impl PortalClient {
    /// Fetches the asesor directory (admin view).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn asesors(&self) -> Result<Vec<AsesorProfile>, ApiError> {
        self.get_json(&["api", "admin", "asesors"]).await
    }

    /// Registers a new asesor in the directory.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn create_asesor(&self, request: &NewAsesor) -> Result<AsesorProfile, ApiError> {
        self.send_json(Method::POST, &["api", "admin", "asesors"], request).await
    }

    /// Removes an asesor from the directory.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails.
    pub async fn delete_asesor(&self, id: &AsesorId) -> Result<(), ApiError> {
        self.execute(Method::DELETE, &["api", "admin", "asesors", id.as_str()], None)
            .await
            .map(|_| ())
    }
}

// ============================================================================
// SECTION: Examination Endpoints
// ============================================================================

impl PortalClient {
    /// Fetches the published examination templates.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn examination_templates(&self) -> Result<Vec<ExaminationTemplate>, ApiError> {
        self.get_json(&["api", "examination-templates"]).await
    }

    /// Fetches a single examination template with its questions.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn examination_template(
        &self,
        id: &TemplateId,
    ) -> Result<ExaminationTemplate, ApiError> {
        self.get_json(&["api", "examination-templates", id.as_str()]).await
    }

    /// Fetches the caller's examinations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn examinations(&self) -> Result<Vec<Examination>, ApiError> {
        self.get_json(&["api", "examinations"]).await
    }

    /// Fetches one examination by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn examination(&self, id: &ExaminationId) -> Result<Examination, ApiError> {
        self.get_json(&["api", "examinations", id.as_str()]).await
    }

    /// Starts a new examination from a template.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn start_examination(
        &self,
        request: &StartExamination,
    ) -> Result<Examination, ApiError> {
        self.send_json(Method::POST, &["api", "examinations"], request).await
    }

    /// Replaces the stored answer sheet for an examination.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn save_answers(
        &self,
        id: &ExaminationId,
        answers: &[Answer],
    ) -> Result<Examination, ApiError> {
        let patch = AnswerSheetPatch {
            answers,
        };
        self.send_json(Method::PATCH, &["api", "examinations", id.as_str()], &patch).await
    }

    /// Requests backend evaluation of a submitted examination.
    ///
    /// The backend scores against its own answer key; the returned
    /// examination carries the authoritative verdict.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn evaluate_examination(&self, id: &ExaminationId) -> Result<Examination, ApiError> {
        let segments = ["api", "examinations", id.as_str(), "evaluate"];
        let raw = self.execute(Method::POST, &segments, None).await?;
        decode_json(&segments, &raw.body)
    }
}

// ============================================================================
// SECTION: Account Endpoints
// ============================================================================

impl PortalClient {
    /// Logs in and captures the backend session cookie.
    ///
    /// On success the session is attached to this client and returned for
    /// persistence.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails, the payload is invalid,
    /// or the response does not set the expected session cookie.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<StoredSession, ApiError> {
        let request = LoginRequest {
            username,
            password,
        };
        let payload = serde_json::to_vec(&request)
            .map_err(|err| ApiError::Json(format!("request serialization failed: {err}")))?;
        let segments = ["api", "login"];
        let raw = self.execute(Method::POST, &segments, Some(payload)).await?;
        let user: User = decode_json(&segments, &raw.body)?;
        let cookie_value =
            extract_session_cookie(&raw.headers, &self.cookie_name).ok_or_else(|| {
                ApiError::Session(format!(
                    "login response did not set cookie {}",
                    self.cookie_name
                ))
            })?;
        let session = StoredSession {
            cookie_name: self.cookie_name.clone(),
            cookie_value,
            user,
        };
        self.attach_session(&session);
        Ok(session)
    }

    /// Logs out the attached session and drops it from this client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        self.execute(Method::POST, &["api", "logout"], None).await?;
        self.clear_session();
        Ok(())
    }

    /// Fetches the user bound to the attached session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json(&["api", "user"]).await
    }
}

// ============================================================================
// SECTION: Form Endpoints
// ============================================================================

impl PortalClient {
    /// Submits a certification registration form.
    ///
    /// Callers are expected to validate the form locally first; the backend
    /// remains the final authority.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails.
    pub async fn submit_registration(&self, form: &RegistrationForm) -> Result<(), ApiError> {
        let payload = serde_json::to_vec(form)
            .map_err(|err| ApiError::Json(format!("request serialization failed: {err}")))?;
        self.execute(Method::POST, &["api", "registrations"], Some(payload)).await.map(|_| ())
    }

    /// Submits a contact form message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<(), ApiError> {
        let payload = serde_json::to_vec(form)
            .map_err(|err| ApiError::Json(format!("request serialization failed: {err}")))?;
        self.execute(Method::POST, &["api", "contacts"], Some(payload)).await.map(|_| ())
    }
}

// ============================================================================
// SECTION: Request Plumbing
// ============================================================================

/// Raw response surface shared by endpoint helpers.
struct RawResponse {
    /// Response headers (used for cookie capture on login).
    headers: HeaderMap,
    /// Response body bytes, already bounded by the size limit.
    body: Vec<u8>,
}

impl PortalClient {
    /// Issues a GET request and decodes the JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let raw = self.execute(Method::GET, segments, None).await?;
        decode_json(segments, &raw.body)
    }

    /// Issues a request with a JSON body and decodes the JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request or payload parsing fails.
    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let payload = serde_json::to_vec(body)
            .map_err(|err| ApiError::Json(format!("request serialization failed: {err}")))?;
        let raw = self.execute(method, segments, Some(payload)).await?;
        decode_json(segments, &raw.body)
    }

    /// Sends one bounded request and collects the response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or
    /// oversized response bodies.
    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        payload: Option<Vec<u8>>,
    ) -> Result<RawResponse, ApiError> {
        let url = self.endpoint(segments)?;
        let headers = self.request_headers(payload.is_some())?;
        let mut request = self.client.request(method, url).headers(headers);
        if let Some(payload) = payload {
            request = request.body(payload);
        }
        let response =
            request.send().await.map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = read_response_body_with_limit(response, self.max_response_bytes).await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        Ok(RawResponse {
            headers,
            body,
        })
    }

    /// Builds an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiError::Config("api.base_url cannot carry paths".to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Builds request headers, including the session cookie when attached.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the stored cookie is not a valid header value.
    fn request_headers(&self, has_body: bool) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(cookie) = &self.session_cookie {
            let value = HeaderValue::from_str(cookie).map_err(|_| {
                ApiError::Session("stored session cookie contains invalid characters".to_string())
            })?;
            headers.insert(COOKIE, value);
        }
        Ok(headers)
    }
}

// ============================================================================
// SECTION: Response Helpers
// ============================================================================

/// Reads a response body while enforcing a hard byte limit.
async fn read_response_body_with_limit(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, ApiError> {
    let mut body = Vec::new();
    let mut total: usize = 0;
    while let Some(chunk) =
        response.chunk().await.map_err(|err| ApiError::Transport(err.to_string()))?
    {
        let next_total = total.checked_add(chunk.len()).ok_or(ApiError::ResponseTooLarge {
            actual: usize::MAX,
            limit,
        })?;
        if next_total > limit {
            return Err(ApiError::ResponseTooLarge {
                actual: next_total,
                limit,
            });
        }
        body.extend_from_slice(&chunk);
        total = next_total;
    }
    Ok(body)
}

/// Decodes a JSON payload for the given endpoint path.
fn decode_json<T: DeserializeOwned>(segments: &[&str], body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|err| ApiError::Json(format!("invalid /{} payload: {err}", segments.join("/"))))
}

/// Builds the status error for a non-success response.
fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
    ApiError::Status {
        status: status.as_u16(),
        message: extract_error_message(status, body),
    }
}

/// Extracts a user-facing message from an error response body.
///
/// Prefers the JSON `message` field, then trimmed body text, then the
/// canonical status reason.
pub(crate) fn extract_error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body)
        && let Some(message) = value.get("message").and_then(Value::as_str)
        && !message.trim().is_empty()
    {
        return message.trim().to_string();
    }
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return status.canonical_reason().unwrap_or("request failed").to_string();
    }
    trimmed.to_string()
}

/// Parses a `Set-Cookie` header value into a name/value pair.
///
/// Attributes after the first `;` are ignored; the value is kept verbatim
/// for replay.
pub(crate) fn parse_set_cookie(value: &str) -> Option<(String, String)> {
    let first = value.split(';').next()?;
    let (name, value) = first.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

/// Finds the named session cookie among `Set-Cookie` response headers.
fn extract_session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    for header in headers.get_all(SET_COOKIE) {
        let Ok(text) = header.to_str() else {
            continue;
        };
        if let Some((name, value)) = parse_set_cookie(text)
            && name == cookie_name
        {
            return Some(value);
        }
    }
    None
}
