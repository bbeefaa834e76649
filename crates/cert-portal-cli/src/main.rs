// crates/cert-portal-cli/src/main.rs
// ============================================================================
// Module: Cert Portal CLI Entry Point
// Description: Command dispatcher for certification portal workflows.
// Purpose: Provide a localized CLI over the portal's public, account, and
//          role-gated operations.
// Dependencies: clap, cert-portal-api, cert-portal-config, cert-portal-core,
//               serde, serde_json, thiserror, tokio.
// ============================================================================

//! ## Overview
//! The `cert-portal` binary drives certification workflows against the portal
//! backend: scheme and directory browsing, public registration and contact
//! forms, cookie-session accounts, the admin asesor directory, and the asesi
//! examination flow. Every protected command consults the role guard before
//! touching the backend, and every guard consultation is recorded as a JSON
//! audit line on stderr. All user-facing strings are routed through the i18n
//! catalog. Security posture: config files, session files, and exam input
//! files are untrusted and read under hard size limits.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use cert_portal_api::ApiError;
use cert_portal_api::NewAsesor;
use cert_portal_api::PortalClient;
use cert_portal_api::SessionStore;
use cert_portal_api::StartExamination;
use cert_portal_api::StoredSession;
use cert_portal_cli::i18n::Locale;
use cert_portal_cli::i18n::set_locale;
use cert_portal_cli::t;
use cert_portal_config::CertPortalConfig;
use cert_portal_config::config_toml_example;
use cert_portal_core::AccessAuditEvent;
use cert_portal_core::AccessAuditSink;
use cert_portal_core::Answer;
use cert_portal_core::AnswerKey;
use cert_portal_core::ApplicationId;
use cert_portal_core::AsesorId;
use cert_portal_core::ContactForm;
use cert_portal_core::ExamSession;
use cert_portal_core::ExaminationId;
use cert_portal_core::ExaminationTemplate;
use cert_portal_core::GuardDecision;
use cert_portal_core::LOGIN_ROUTE;
use cert_portal_core::ProvinceId;
use cert_portal_core::QuestionId;
use cert_portal_core::RegistrationForm;
use cert_portal_core::Role;
use cert_portal_core::ScheduleId;
use cert_portal_core::SchemeId;
use cert_portal_core::SessionState;
use cert_portal_core::TemplateId;
use cert_portal_core::UNAUTHORIZED_ROUTE;
use cert_portal_core::guard_view;
use cert_portal_core::score_sheet;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "CERT_PORTAL_LANG";
/// Maximum size of an answer sheet JSON input.
const MAX_SHEET_BYTES: usize = 256 * 1024;
/// Maximum size of an answer key JSON input.
const MAX_KEY_BYTES: usize = 256 * 1024;
/// Maximum size of an exam template JSON input.
const MAX_TEMPLATE_BYTES: usize = 1024 * 1024;

/// Required-role set for views open to any authenticated user.
const ANY_AUTHENTICATED: &[Role] = &[];
/// Required-role set for admin-only views.
const ADMIN_ONLY: &[Role] = &[Role::Admin];
/// Required-role set for asesi-only views.
const ASESI_ONLY: &[Role] = &[Role::Asesi];

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "cert-portal", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `CERT_PORTAL_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Optional config file path (defaults to cert-portal.toml or env override).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Certification scheme browsing.
    Schemes {
        /// Selected scheme subcommand.
        #[command(subcommand)]
        command: SchemesCommand,
    },
    /// Industry partner directory.
    Partners {
        /// Selected partner subcommand.
        #[command(subcommand)]
        command: PartnersCommand,
    },
    /// Province directory.
    Provinces {
        /// Selected province subcommand.
        #[command(subcommand)]
        command: ProvincesCommand,
    },
    /// Assessment schedule listings.
    Schedules {
        /// Selected schedule subcommand.
        #[command(subcommand)]
        command: SchedulesCommand,
    },
    /// Submit a certification registration.
    Register(RegisterCommand),
    /// Send a message through the public contact form.
    Contact(ContactCommand),
    /// Log in and store the session cookie.
    Login(LoginCommand),
    /// Log out and clear the stored session.
    Logout,
    /// Show the authenticated user.
    Whoami,
    /// Show the dashboard for the session role.
    Dashboard,
    /// Asesor directory administration (admin only).
    Asesor {
        /// Selected asesor subcommand.
        #[command(subcommand)]
        command: AsesorCommand,
    },
    /// Examination workflows (asesi only).
    Exam {
        /// Selected exam subcommand.
        #[command(subcommand)]
        command: ExamCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Scheme subcommands.
#[derive(Subcommand, Debug)]
enum SchemesCommand {
    /// List certification schemes.
    List(SchemesListCommand),
    /// Show one scheme by slug.
    Show(SchemesShowCommand),
}

/// Arguments for `schemes list`.
#[derive(Args, Debug)]
struct SchemesListCommand {
    /// Show only schemes in this category (case-insensitive).
    #[arg(long, value_name = "CATEGORY")]
    category: Option<String>,
}

/// Arguments for `schemes show`.
#[derive(Args, Debug)]
struct SchemesShowCommand {
    /// Scheme slug to fetch.
    #[arg(long, value_name = "SLUG")]
    slug: String,
}

/// Partner subcommands.
#[derive(Subcommand, Debug)]
enum PartnersCommand {
    /// List industry partners.
    List,
}

/// Province subcommands.
#[derive(Subcommand, Debug)]
enum ProvincesCommand {
    /// List provinces.
    List,
}

/// Schedule subcommands.
#[derive(Subcommand, Debug)]
enum SchedulesCommand {
    /// List assessment schedules.
    List(SchedulesListCommand),
}

/// Arguments for `schedules list`.
#[derive(Args, Debug)]
struct SchedulesListCommand {
    /// Show only schedules for this scheme identifier.
    #[arg(long, value_name = "SCHEME_ID")]
    scheme: Option<String>,
}

/// Arguments for `register`.
#[derive(Args, Debug)]
struct RegisterCommand {
    /// Applicant full name.
    #[arg(long = "full-name", value_name = "NAME")]
    full_name: String,
    /// Contact email address.
    #[arg(long, value_name = "EMAIL")]
    email: String,
    /// Contact phone number.
    #[arg(long, value_name = "PHONE")]
    phone: String,
    /// Target certification scheme identifier.
    #[arg(long, value_name = "SCHEME_ID")]
    scheme: String,
    /// Optional province identifier.
    #[arg(long, value_name = "PROVINCE_ID")]
    province: Option<String>,
    /// Optional assessment schedule identifier.
    #[arg(long, value_name = "SCHEDULE_ID")]
    schedule: Option<String>,
}

/// Arguments for `contact`.
#[derive(Args, Debug)]
struct ContactCommand {
    /// Sender name.
    #[arg(long, value_name = "NAME")]
    name: String,
    /// Reply-to email address.
    #[arg(long, value_name = "EMAIL")]
    email: String,
    /// Optional message subject.
    #[arg(long, value_name = "SUBJECT")]
    subject: Option<String>,
    /// Message body.
    #[arg(long, value_name = "MESSAGE")]
    message: String,
}

/// Arguments for `login`.
#[derive(Args, Debug)]
struct LoginCommand {
    /// Account username.
    #[arg(long, value_name = "USERNAME")]
    username: String,
    /// Account password.
    #[arg(long, value_name = "PASSWORD")]
    password: String,
}

/// Asesor subcommands.
#[derive(Subcommand, Debug)]
enum AsesorCommand {
    /// List registered asesors.
    List,
    /// Register a new asesor.
    Add(AsesorAddCommand),
    /// Remove an asesor by identifier.
    Remove(AsesorRemoveCommand),
}

/// Arguments for `asesor add`.
#[derive(Args, Debug)]
struct AsesorAddCommand {
    /// Asesor full name.
    #[arg(long = "full-name", value_name = "NAME")]
    full_name: String,
    /// Asesor email address.
    #[arg(long, value_name = "EMAIL")]
    email: String,
    /// Optional competency description.
    #[arg(long, value_name = "COMPETENCY")]
    competency: Option<String>,
    /// Optional registration number.
    #[arg(long = "registration-number", value_name = "NUMBER")]
    registration_number: Option<String>,
}

/// Arguments for `asesor remove`.
#[derive(Args, Debug)]
struct AsesorRemoveCommand {
    /// Asesor identifier to remove.
    #[arg(long, value_name = "ASESOR_ID")]
    id: String,
}

/// Exam subcommands.
#[derive(Subcommand, Debug)]
enum ExamCommand {
    /// List published examination templates.
    Templates,
    /// Start an examination from a template.
    Start(ExamStartCommand),
    /// Record a single answer on a running examination.
    Answer(ExamAnswerCommand),
    /// Replace the answer sheet from a JSON file.
    Fill(ExamFillCommand),
    /// Review the current answer sheet and progress.
    Review(ExamReviewCommand),
    /// Submit an examination for backend evaluation.
    Submit(ExamSubmitCommand),
    /// Show the evaluation result.
    Result(ExamResultCommand),
    /// Score an answer sheet locally against a key file (offline).
    Practice(ExamPracticeCommand),
}

/// Arguments for `exam start`.
#[derive(Args, Debug)]
struct ExamStartCommand {
    /// Template identifier to start from.
    #[arg(long, value_name = "TEMPLATE_ID")]
    template: String,
    /// Optional application identifier to attach.
    #[arg(long, value_name = "APPLICATION_ID")]
    application: Option<String>,
}

/// Arguments for `exam answer`.
#[derive(Args, Debug)]
struct ExamAnswerCommand {
    /// Examination identifier.
    #[arg(long, value_name = "EXAM_ID")]
    exam: String,
    /// Question identifier.
    #[arg(long, value_name = "QUESTION_ID")]
    question: String,
    /// Selected option key.
    #[arg(long, value_name = "CHOICE")]
    choice: String,
}

/// Arguments for `exam fill`.
#[derive(Args, Debug)]
struct ExamFillCommand {
    /// Examination identifier.
    #[arg(long, value_name = "EXAM_ID")]
    exam: String,
    /// Path to a JSON answer sheet.
    #[arg(long, value_name = "PATH")]
    answers: PathBuf,
}

/// Arguments for `exam review`.
#[derive(Args, Debug)]
struct ExamReviewCommand {
    /// Examination identifier.
    #[arg(long, value_name = "EXAM_ID")]
    exam: String,
}

/// Arguments for `exam submit`.
#[derive(Args, Debug)]
struct ExamSubmitCommand {
    /// Examination identifier.
    #[arg(long, value_name = "EXAM_ID")]
    exam: String,
}

/// Arguments for `exam result`.
#[derive(Args, Debug)]
struct ExamResultCommand {
    /// Examination identifier.
    #[arg(long, value_name = "EXAM_ID")]
    exam: String,
}

/// Arguments for `exam practice`.
#[derive(Args, Debug)]
struct ExamPracticeCommand {
    /// Path to an exam template JSON file.
    #[arg(long, value_name = "PATH")]
    template: PathBuf,
    /// Path to an answer key JSON file.
    #[arg(long, value_name = "PATH")]
    key: PathBuf,
    /// Path to a JSON answer sheet.
    #[arg(long, value_name = "PATH")]
    answers: PathBuf,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate the portal configuration file.
    Validate,
    /// Print an example configuration file.
    Example,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Indonesian.
    Id,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config_path = cli.config;
    match command {
        Commands::Schemes {
            command,
        } => command_schemes(command, config_path.as_deref()).await,
        Commands::Partners {
            command,
        } => command_partners(command, config_path.as_deref()).await,
        Commands::Provinces {
            command,
        } => command_provinces(command, config_path.as_deref()).await,
        Commands::Schedules {
            command,
        } => command_schedules(command, config_path.as_deref()).await,
        Commands::Register(command) => command_register(command, config_path.as_deref()).await,
        Commands::Contact(command) => command_contact(command, config_path.as_deref()).await,
        Commands::Login(command) => command_login(command, config_path.as_deref()).await,
        Commands::Logout => command_logout(config_path.as_deref()).await,
        Commands::Whoami => command_whoami(config_path.as_deref()).await,
        Commands::Dashboard => command_dashboard(config_path.as_deref()).await,
        Commands::Asesor {
            command,
        } => command_asesor(command, config_path.as_deref()).await,
        Commands::Exam {
            command,
        } => command_exam(command, config_path.as_deref()).await,
        Commands::Config {
            command,
        } => command_config(command, config_path.as_deref()),
    }
}

/// Prints top-level usage to stdout.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Directory Commands
// ============================================================================

/// Dispatches scheme subcommands.
async fn command_schemes(
    command: SchemesCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    match command {
        SchemesCommand::List(command) => command_schemes_list(command, config_path).await,
        SchemesCommand::Show(command) => command_schemes_show(command, config_path).await,
    }
}

/// Executes `schemes list`.
async fn command_schemes_list(
    command: SchemesListCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let (_config, client) = portal_context(config_path)?;
    let mut schemes = client.schemes().await.map_err(api_failure)?;
    if let Some(category) = command.category.as_deref() {
        schemes.retain(|scheme| scheme.category.eq_ignore_ascii_case(category));
    }
    if schemes.is_empty() {
        write_stdout_line(&t!("schemes.none"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    write_stdout_line(&t!("schemes.header"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    for scheme in &schemes {
        write_stdout_line(&t!(
            "schemes.entry",
            name = scheme.name,
            slug = scheme.slug,
            category = scheme.category
        ))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes `schemes show`.
async fn command_schemes_show(
    command: SchemesShowCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let (_config, client) = portal_context(config_path)?;
    let scheme = client.scheme_by_slug(&command.slug).await.map_err(api_failure)?;
    write_stdout_line(&t!("schemes.show.name", name = scheme.name))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("schemes.show.slug", slug = scheme.slug))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("schemes.show.category", category = scheme.category))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("schemes.show.description", description = scheme.description))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Dispatches partner subcommands.
async fn command_partners(
    command: PartnersCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    match command {
        PartnersCommand::List => command_partners_list(config_path).await,
    }
}

/// Executes `partners list`.
async fn command_partners_list(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let (_config, client) = portal_context(config_path)?;
    let partners = client.partners().await.map_err(api_failure)?;
    if partners.is_empty() {
        write_stdout_line(&t!("partners.none"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    write_stdout_line(&t!("partners.header"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    for partner in &partners {
        let website =
            partner.website.clone().unwrap_or_else(|| t!("partners.website.none"));
        write_stdout_line(&t!("partners.entry", name = partner.name, website = website))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Dispatches province subcommands.
async fn command_provinces(
    command: ProvincesCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    match command {
        ProvincesCommand::List => command_provinces_list(config_path).await,
    }
}

/// Executes `provinces list`.
async fn command_provinces_list(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let (_config, client) = portal_context(config_path)?;
    let provinces = client.provinces().await.map_err(api_failure)?;
    if provinces.is_empty() {
        write_stdout_line(&t!("provinces.none"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    write_stdout_line(&t!("provinces.header"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    for province in &provinces {
        write_stdout_line(&t!("provinces.entry", id = province.id, name = province.name))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Dispatches schedule subcommands.
async fn command_schedules(
    command: SchedulesCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    match command {
        SchedulesCommand::List(command) => command_schedules_list(command, config_path).await,
    }
}

/// Executes `schedules list`.
async fn command_schedules_list(
    command: SchedulesListCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let (_config, client) = portal_context(config_path)?;
    let mut schedules = client.schedules().await.map_err(api_failure)?;
    if let Some(scheme) = command.scheme.as_deref() {
        schedules.retain(|schedule| {
            schedule.scheme_id.as_ref().is_some_and(|id| id.as_str() == scheme)
        });
    }
    if schedules.is_empty() {
        write_stdout_line(&t!("schedules.none"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    write_stdout_line(&t!("schedules.header"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    for schedule in &schedules {
        // Unparseable date windows are still listed; they are flagged rather
        // than hidden so operators notice bad backend data.
        let line = if schedule.window().is_some() {
            let location =
                schedule.location.clone().unwrap_or_else(|| t!("schedules.location.none"));
            t!(
                "schedules.entry",
                name = schedule.name,
                start = schedule.start_date,
                end = schedule.end_date,
                location = location
            )
        } else {
            t!(
                "schedules.dates_invalid",
                name = schedule.name,
                start = schedule.start_date,
                end = schedule.end_date
            )
        };
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Form Commands
// ============================================================================

/// Executes `register`.
///
/// Validation runs before any configuration or network access; invalid forms
/// never reach the backend.
async fn command_register(
    command: RegisterCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let form = RegistrationForm {
        full_name: command.full_name,
        email: command.email,
        phone: command.phone,
        scheme_id: SchemeId::new(command.scheme),
        province_id: command.province.map(ProvinceId::new),
        schedule_id: command.schedule.map(ScheduleId::new),
    };
    form.validate().map_err(|err| CliError::new(t!("form.invalid", errors = err)))?;
    let (_config, client) = portal_context(config_path)?;
    client.submit_registration(&form).await.map_err(api_failure)?;
    write_stdout_line(&t!("register.ok", name = form.full_name))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `contact`.
async fn command_contact(
    command: ContactCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let form = ContactForm {
        name: command.name,
        email: command.email,
        subject: command.subject,
        message: command.message,
    };
    form.validate().map_err(|err| CliError::new(t!("form.invalid", errors = err)))?;
    let (_config, client) = portal_context(config_path)?;
    client.submit_contact(&form).await.map_err(api_failure)?;
    write_stdout_line(&t!("contact.ok", email = form.email))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Account Commands
// ============================================================================

/// Executes `login`.
async fn command_login(command: LoginCommand, config_path: Option<&Path>) -> CliResult<ExitCode> {
    let (config, mut client) = portal_context(config_path)?;
    let session =
        client.login(&command.username, &command.password).await.map_err(api_failure)?;
    let store = SessionStore::new(&config.session.path);
    store.save(&session).map_err(|err| CliError::new(t!("session.save_failed", error = err)))?;
    write_stdout_line(&t!(
        "login.ok",
        username = session.user.username,
        role = session.user.role
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("login.landing", route = session.user.role.landing_route()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `logout`.
async fn command_logout(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let (config, mut client) = portal_context(config_path)?;
    let store = SessionStore::new(&config.session.path);
    let loaded =
        store.load().map_err(|err| CliError::new(t!("session.load_failed", error = err)))?;
    let Some(session) = loaded else {
        write_stdout_line(&t!("logout.no_session"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    };
    client.attach_session(&session);
    // Backend revocation is best effort; the stored session clears regardless
    // so a stale or already-expired cookie cannot wedge logout.
    let _ = client.logout().await;
    store.clear().map_err(|err| CliError::new(t!("session.clear_failed", error = err)))?;
    write_stdout_line(&t!("logout.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `whoami`.
///
/// The stored cookie is replayed against the backend so the output reflects
/// the session the server actually honors, not just the local file.
async fn command_whoami(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let (config, mut client) = portal_context(config_path)?;
    let store = SessionStore::new(&config.session.path);
    let session = store
        .load()
        .map_err(|err| CliError::new(t!("session.load_failed", error = err)))?
        .ok_or_else(|| CliError::new(t!("session.none")))?;
    client.attach_session(&session);
    let user = client.current_user().await.map_err(api_failure)?;
    write_stdout_line(&t!(
        "whoami.user",
        username = user.username,
        email = user.email,
        role = user.role
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Dashboard Command
// ============================================================================

/// Executes `dashboard`.
async fn command_dashboard(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let (_config, client, session) =
        authenticated_context("dashboard", ANY_AUTHENTICATED, config_path)?;
    let user = &session.user;
    write_stdout_line(&t!("dashboard.header", username = user.username, role = user.role))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("dashboard.route", route = user.role.landing_route()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    match user.role {
        Role::Admin => {
            let asesors = client.asesors().await.map_err(api_failure)?;
            write_stdout_line(&t!("dashboard.admin.asesors", count = asesors.len()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        Role::Asesor => {
            let schedules = client.schedules().await.map_err(api_failure)?;
            write_stdout_line(&t!("dashboard.asesor.schedules", count = schedules.len()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        Role::Asesi => {
            let examinations = client.examinations().await.map_err(api_failure)?;
            write_stdout_line(&t!("dashboard.asesi.exams", count = examinations.len()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            for examination in &examinations {
                let line = match examination.score {
                    Some(score) => t!(
                        "dashboard.asesi.exam_entry_scored",
                        id = examination.id,
                        status = examination.status.as_str(),
                        score = score
                    ),
                    None => t!(
                        "dashboard.asesi.exam_entry",
                        id = examination.id,
                        status = examination.status.as_str()
                    ),
                };
                write_stdout_line(&line)
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Asesor Commands
// ============================================================================

/// Dispatches asesor subcommands.
async fn command_asesor(command: AsesorCommand, config_path: Option<&Path>) -> CliResult<ExitCode> {
    match command {
        AsesorCommand::List => command_asesor_list(config_path).await,
        AsesorCommand::Add(command) => command_asesor_add(command, config_path).await,
        AsesorCommand::Remove(command) => command_asesor_remove(command, config_path).await,
    }
}

/// Executes `asesor list`.
async fn command_asesor_list(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let (_config, client, _session) =
        authenticated_context("asesor_directory", ADMIN_ONLY, config_path)?;
    let profiles = client.asesors().await.map_err(api_failure)?;
    if profiles.is_empty() {
        write_stdout_line(&t!("asesor.none"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    write_stdout_line(&t!("asesor.header"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    for profile in &profiles {
        let line = match profile.competency.as_deref() {
            Some(competency) => t!(
                "asesor.entry_competency",
                id = profile.id,
                name = profile.full_name,
                email = profile.email,
                competency = competency
            ),
            None => t!(
                "asesor.entry",
                id = profile.id,
                name = profile.full_name,
                email = profile.email
            ),
        };
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes `asesor add`.
async fn command_asesor_add(
    command: AsesorAddCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let (_config, client, _session) =
        authenticated_context("asesor_directory", ADMIN_ONLY, config_path)?;
    let request = NewAsesor {
        full_name: command.full_name,
        email: command.email,
        competency: command.competency,
        registration_number: command.registration_number,
    };
    let profile = client.create_asesor(&request).await.map_err(api_failure)?;
    write_stdout_line(&t!("asesor.added", name = profile.full_name, id = profile.id))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `asesor remove`.
async fn command_asesor_remove(
    command: AsesorRemoveCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let (_config, client, _session) =
        authenticated_context("asesor_directory", ADMIN_ONLY, config_path)?;
    let id = AsesorId::new(command.id);
    client.delete_asesor(&id).await.map_err(api_failure)?;
    write_stdout_line(&t!("asesor.removed", id = id))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Exam Commands
// ============================================================================

/// Dispatches exam subcommands.
async fn command_exam(command: ExamCommand, config_path: Option<&Path>) -> CliResult<ExitCode> {
    match command {
        ExamCommand::Templates => command_exam_templates(config_path).await,
        ExamCommand::Start(command) => command_exam_start(command, config_path).await,
        ExamCommand::Answer(command) => command_exam_answer(command, config_path).await,
        ExamCommand::Fill(command) => command_exam_fill(command, config_path).await,
        ExamCommand::Review(command) => command_exam_review(command, config_path).await,
        ExamCommand::Submit(command) => command_exam_submit(command, config_path).await,
        ExamCommand::Result(command) => command_exam_result(command, config_path).await,
        ExamCommand::Practice(command) => command_exam_practice(&command, config_path),
    }
}

/// Executes `exam templates`.
async fn command_exam_templates(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let (_config, client, _session) =
        authenticated_context("examinations", ASESI_ONLY, config_path)?;
    let templates = client.examination_templates().await.map_err(api_failure)?;
    if templates.is_empty() {
        write_stdout_line(&t!("exam.templates.none"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    write_stdout_line(&t!("exam.templates.header"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    for template in &templates {
        write_stdout_line(&t!(
            "exam.templates.entry",
            id = template.id,
            name = template.name,
            questions = template.questions.len(),
            minutes = template.duration_minutes,
            passing = template.passing_score
        ))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes `exam start`.
async fn command_exam_start(
    command: ExamStartCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let (_config, client, _session) =
        authenticated_context("examinations", ASESI_ONLY, config_path)?;
    let request = StartExamination {
        template_id: TemplateId::new(command.template),
        application_id: command.application.map(ApplicationId::new),
    };
    let examination = client.start_examination(&request).await.map_err(api_failure)?;
    write_stdout_line(&t!(
        "exam.started",
        id = examination.id,
        status = examination.status.as_str()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `exam answer`.
async fn command_exam_answer(
    command: ExamAnswerCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let (_config, client, _session) =
        authenticated_context("examinations", ASESI_ONLY, config_path)?;
    let examination_id = ExaminationId::new(command.exam);
    let examination = client.examination(&examination_id).await.map_err(api_failure)?;
    if !examination.status.accepts_answers() {
        return Err(CliError::new(t!(
            "exam.not_answerable",
            id = examination.id,
            status = examination.status.as_str()
        )));
    }
    let template =
        client.examination_template(&examination.template_id).await.map_err(api_failure)?;
    let question_id = QuestionId::new(command.question);
    check_choice(&template, &question_id, &command.choice)?;
    let mut sheet = restore_sheet(&template, &examination.answers)?;
    sheet
        .record(&question_id, command.choice)
        .map_err(|err| CliError::new(t!("exam.sheet_failed", error = err)))?;
    let updated =
        client.save_answers(&examination_id, &sheet.answers()).await.map_err(api_failure)?;
    write_stdout_line(&t!(
        "exam.answer.saved",
        question = question_id,
        answered = updated.answers.len(),
        total = template.questions.len()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `exam fill`.
async fn command_exam_fill(
    command: ExamFillCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let (_config, client, _session) =
        authenticated_context("examinations", ASESI_ONLY, config_path)?;
    let entries: Vec<Answer> =
        read_json_input(&command.answers, &t!("input.kind.answers"), MAX_SHEET_BYTES)?;
    let examination_id = ExaminationId::new(command.exam);
    let examination = client.examination(&examination_id).await.map_err(api_failure)?;
    if !examination.status.accepts_answers() {
        return Err(CliError::new(t!(
            "exam.not_answerable",
            id = examination.id,
            status = examination.status.as_str()
        )));
    }
    let template =
        client.examination_template(&examination.template_id).await.map_err(api_failure)?;
    let sheet = build_sheet(&template, &entries)?;
    let updated =
        client.save_answers(&examination_id, &sheet.answers()).await.map_err(api_failure)?;
    write_stdout_line(&t!(
        "exam.fill.saved",
        answered = updated.answers.len(),
        total = template.questions.len()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `exam review`.
async fn command_exam_review(
    command: ExamReviewCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let (_config, client, _session) =
        authenticated_context("examinations", ASESI_ONLY, config_path)?;
    let examination_id = ExaminationId::new(command.exam);
    let examination = client.examination(&examination_id).await.map_err(api_failure)?;
    let template =
        client.examination_template(&examination.template_id).await.map_err(api_failure)?;
    write_stdout_line(&t!(
        "exam.review.header",
        id = examination.id,
        status = examination.status.as_str()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    for question in &template.questions {
        let answer = examination
            .answers
            .iter()
            .find(|entry| entry.question_id == question.id)
            .map_or_else(|| t!("exam.review.unanswered"), |entry| entry.answer.clone());
        write_stdout_line(&t!("exam.review.entry", question = question.id, answer = answer))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    write_stdout_line(&t!(
        "exam.review.progress",
        answered = examination.answers.len(),
        total = template.questions.len()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `exam submit`.
///
/// The backend owns the status transition and scores against its own answer
/// key; this command only requests evaluation.
async fn command_exam_submit(
    command: ExamSubmitCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let (_config, client, _session) =
        authenticated_context("examinations", ASESI_ONLY, config_path)?;
    let examination_id = ExaminationId::new(command.exam);
    let examination = client.evaluate_examination(&examination_id).await.map_err(api_failure)?;
    write_stdout_line(&t!("exam.submitted", id = examination.id))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `exam result`.
async fn command_exam_result(
    command: ExamResultCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let (_config, client, _session) =
        authenticated_context("examinations", ASESI_ONLY, config_path)?;
    let examination_id = ExaminationId::new(command.exam);
    let examination = client.examination(&examination_id).await.map_err(api_failure)?;
    let (Some(score), Some(passed)) = (examination.score, examination.passed) else {
        write_stdout_line(&t!(
            "exam.result.pending",
            id = examination.id,
            status = examination.status.as_str()
        ))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    };
    write_stdout_line(&t!(
        "exam.result.summary",
        id = examination.id,
        score = score,
        correct = examination.correct_answers.unwrap_or(0),
        total = examination.total_questions
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    let verdict = if passed {
        t!("exam.result.passed")
    } else {
        t!("exam.result.failed")
    };
    write_stdout_line(&verdict).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `exam practice`.
///
/// Scoring happens entirely on this machine against a user-provided key; no
/// session, guard, or network access is involved.
fn command_exam_practice(
    command: &ExamPracticeCommand,
    config_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let config = load_config(config_path)?;
    let template: ExaminationTemplate =
        read_json_input(&command.template, &t!("input.kind.template"), MAX_TEMPLATE_BYTES)?;
    let key_entries: Vec<Answer> =
        read_json_input(&command.key, &t!("input.kind.key"), MAX_KEY_BYTES)?;
    let key = AnswerKey::from_pairs(
        key_entries.into_iter().map(|entry| (entry.question_id, entry.answer)),
    )
    .map_err(|err| CliError::new(t!("exam.sheet_failed", error = err)))?;
    let entries: Vec<Answer> =
        read_json_input(&command.answers, &t!("input.kind.answers"), MAX_SHEET_BYTES)?;
    let sheet = build_sheet(&template, &entries)?;
    let score = score_sheet(&sheet.answers(), &key, config.exam.passing_score);
    write_stdout_line(&t!(
        "exam.practice.summary",
        score = score.score,
        correct = score.correct_answers,
        total = score.total_questions,
        passing = config.exam.passing_score
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    let verdict = if score.passed {
        t!("exam.result.passed")
    } else {
        t!("exam.result.failed")
    };
    write_stdout_line(&verdict).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand, config_path: Option<&Path>) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate => command_config_validate(config_path),
        ConfigCommand::Example => command_config_example(),
    }
}

/// Executes `config validate`.
fn command_config_validate(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let _config = CertPortalConfig::load(config_path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `config example`.
fn command_config_example() -> CliResult<ExitCode> {
    write_stdout_bytes(config_toml_example().as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Context Helpers
// ============================================================================

/// Loads configuration with default fallback resolution.
fn load_config(config_path: Option<&Path>) -> CliResult<CertPortalConfig> {
    CertPortalConfig::load_or_default(config_path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Loads configuration and constructs the REST client.
fn portal_context(config_path: Option<&Path>) -> CliResult<(CertPortalConfig, PortalClient)> {
    let config = load_config(config_path)?;
    let client = PortalClient::new(&config)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    Ok((config, client))
}

/// Loads configuration, enforces the view guard, and attaches the session.
fn authenticated_context(
    view: &str,
    required: &[Role],
    config_path: Option<&Path>,
) -> CliResult<(CertPortalConfig, PortalClient, StoredSession)> {
    let (config, mut client) = portal_context(config_path)?;
    let store = SessionStore::new(&config.session.path);
    let loaded =
        store.load().map_err(|err| CliError::new(t!("session.load_failed", error = err)))?;
    let session = enforce_guard(view, required, loaded)?;
    client.attach_session(&session);
    Ok((config, client, session))
}

/// Runs the route guard for a view and converts denials into errors.
///
/// The guard consultation is recorded on stderr before the outcome is
/// applied, so denied attempts leave an audit line too.
fn enforce_guard(
    view: &str,
    required: &[Role],
    session: Option<StoredSession>,
) -> CliResult<StoredSession> {
    let state = match &session {
        Some(stored) => SessionState::Authenticated {
            user: stored.user.clone(),
        },
        None => SessionState::Anonymous,
    };
    let decision = guard_view(view, required, &state, &StderrAccessAuditSink);
    match decision {
        GuardDecision::Allow => session.ok_or_else(|| CliError::new(t!("session.none"))),
        GuardDecision::Loading => Err(CliError::new(t!("guard.loading"))),
        GuardDecision::RedirectLogin => Err(CliError::new(t!(
            "guard.redirect_login",
            target = decision.target_route().unwrap_or(LOGIN_ROUTE)
        ))),
        GuardDecision::RedirectUnauthorized => Err(CliError::new(t!(
            "guard.redirect_unauthorized",
            target = decision.target_route().unwrap_or(UNAUTHORIZED_ROUTE)
        ))),
    }
}

/// Audit sink that writes guard consultations to stderr as JSON lines.
struct StderrAccessAuditSink;

impl AccessAuditSink for StderrAccessAuditSink {
    fn record(&self, event: &AccessAuditEvent) {
        // Audit output must never abort the command; write failures and
        // serialization failures are dropped.
        if let Ok(line) = serde_json::to_string(event) {
            let _ = write_stderr_line(&line);
        }
    }
}

/// Converts backend failures into localized CLI errors.
///
/// HTTP status failures already carry the canonical `HTTP <status>:
/// <message>` surface and pass through unchanged.
fn api_failure(error: ApiError) -> CliError {
    match error {
        ApiError::Status {
            ..
        } => CliError::new(error.to_string()),
        _ => CliError::new(t!("api.request_failed", error = error)),
    }
}

// ============================================================================
// SECTION: Exam Helpers
// ============================================================================

/// Rejects choices that are not options on the target question.
///
/// Unknown question identifiers are left for sheet restoration to reject, so
/// the error names the failing question either way.
fn check_choice(
    template: &ExaminationTemplate,
    question_id: &QuestionId,
    choice: &str,
) -> CliResult<()> {
    if let Some(question) = template.question(question_id)
        && !question.has_option(choice)
    {
        return Err(CliError::new(t!(
            "exam.invalid_option",
            choice = choice,
            question = question_id
        )));
    }
    Ok(())
}

/// Rebuilds the local answer sheet for a template from stored answers.
fn restore_sheet(template: &ExaminationTemplate, saved: &[Answer]) -> CliResult<ExamSession> {
    let questions = template.questions.iter().map(|question| question.id.clone()).collect();
    ExamSession::restore(questions, saved)
        .map_err(|err| CliError::new(t!("exam.sheet_failed", error = err)))
}

/// Builds a fresh answer sheet for a template from loose entries.
///
/// Later entries for the same question overwrite earlier ones, matching the
/// replace-the-sheet semantics of the backend PATCH.
fn build_sheet(template: &ExaminationTemplate, entries: &[Answer]) -> CliResult<ExamSession> {
    let mut sheet = ExamSession::from_template(template)
        .map_err(|err| CliError::new(t!("exam.sheet_failed", error = err)))?;
    for entry in entries {
        check_choice(template, &entry.question_id, &entry.answer)?;
        sheet
            .record(&entry.question_id, entry.answer.clone())
            .map_err(|err| CliError::new(t!("exam.sheet_failed", error = err)))?;
    }
    Ok(sheet)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Reads and parses a JSON input file under a hard size limit.
fn read_json_input<T: DeserializeOwned>(
    path: &Path,
    kind: &str,
    max_bytes: usize,
) -> CliResult<T> {
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(err) => CliError::new(t!(
            "input.read_failed",
            kind = kind,
            path = path.display(),
            error = err
        )),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        CliError::new(t!("input.parse_failed", kind = kind, path = path.display(), error = err))
    })
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Converts CLI language selections into locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Id => Self::Id,
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
