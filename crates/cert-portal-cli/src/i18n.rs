// crates/cert-portal-cli/src/i18n.rs
// ============================================================================
// Module: i18n
// Description: Message catalogs and translation helpers for CLI output.
// Purpose: Route every user-facing string through locale-aware catalogs with
//          an English fallback chain.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Message catalogs for the `cert-portal` binary. The CLI resolves one locale
//! per process from the `--lang` flag or the environment, then renders every
//! user-facing string through [`translate`]. Lookups fall back to English when
//! the active locale lacks a key and to the key itself when no catalog carries
//! it, so output never silently disappears.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Locale Types
// ============================================================================

/// Supported output locales.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Locale {
    /// English (default).
    En,
    /// Indonesian.
    Id,
}

impl Locale {
    /// Returns the canonical language code for the locale.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Id => "id",
        }
    }

    /// Parses a locale from a language tag, ignoring case and region subtags.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_ascii_lowercase();
        let language = lowered.split(['-', '_']).next()?;
        match language {
            "en" => Some(Self::En),
            "id" => Some(Self::Id),
            _ => None,
        }
    }
}

/// All locales with a message catalog.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Id];

/// Message argument used for placeholder substitution.
#[derive(Clone, Debug)]
pub struct MessageArg {
    /// Placeholder name without braces.
    pub key: &'static str,
    /// Replacement value.
    pub value: String,
}

impl MessageArg {
    /// Creates a new message argument.
    #[must_use]
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale State
// ============================================================================

/// Locale active for the current process.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the process locale. The first call wins; later calls are ignored.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the active locale, defaulting to English.
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalogs
// ============================================================================

/// English message catalog.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "cert-portal {version}"),
    (
        "i18n.disclaimer.machine_translated",
        "Note: output in languages other than English is machine translated \
         and may contain mistakes. The English text remains authoritative.",
    ),
    (
        "i18n.lang.invalid_env",
        "Invalid value for {env}: {value}. Expected 'en' or 'id'.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("api.request_failed", "Request failed: {error}"),
    ("session.none", "No active session. Run `cert-portal login` first."),
    ("session.load_failed", "Failed to load session: {error}"),
    ("session.save_failed", "Failed to save session: {error}"),
    ("session.clear_failed", "Failed to clear session: {error}"),
    (
        "guard.loading",
        "Session check still in progress; nothing to show yet.",
    ),
    (
        "guard.redirect_login",
        "Authentication required; redirected to {target}. Run \
         `cert-portal login` first.",
    ),
    (
        "guard.redirect_unauthorized",
        "Access denied for this view; redirected to {target}.",
    ),
    ("login.ok", "Logged in as {username} ({role})."),
    ("login.landing", "Continue at {route}."),
    ("logout.ok", "Logged out."),
    ("logout.no_session", "No active session; nothing to do."),
    ("whoami.user", "{username} <{email}> role {role}"),
    ("form.invalid", "Form validation failed: {errors}"),
    ("register.ok", "Registration submitted for {name}."),
    ("contact.ok", "Message sent. A reply will go to {email}."),
    ("schemes.header", "Certification schemes:"),
    ("schemes.none", "No schemes found."),
    ("schemes.entry", "- {name} ({slug}) [{category}]"),
    ("schemes.show.name", "Scheme: {name}"),
    ("schemes.show.slug", "Slug: {slug}"),
    ("schemes.show.category", "Category: {category}"),
    ("schemes.show.description", "{description}"),
    ("partners.header", "Industry partners:"),
    ("partners.none", "No partners found."),
    ("partners.entry", "- {name} ({website})"),
    ("partners.website.none", "no website"),
    ("provinces.header", "Provinces:"),
    ("provinces.none", "No provinces found."),
    ("provinces.entry", "- {id}: {name}"),
    ("schedules.header", "Assessment schedules:"),
    ("schedules.none", "No schedules found."),
    ("schedules.entry", "- {name}: {start} to {end} ({location})"),
    ("schedules.location.none", "location to be announced"),
    (
        "schedules.dates_invalid",
        "- {name}: invalid schedule window ({start} to {end})",
    ),
    ("dashboard.header", "Dashboard for {username} ({role})"),
    ("dashboard.route", "Route: {route}"),
    ("dashboard.admin.asesors", "Registered asesors: {count}"),
    ("dashboard.asesor.schedules", "Published schedules: {count}"),
    ("dashboard.asesi.exams", "Your examinations: {count}"),
    ("dashboard.asesi.exam_entry", "- {id}: {status}"),
    ("dashboard.asesi.exam_entry_scored", "- {id}: {status} (score {score})"),
    ("asesor.header", "Asesor directory:"),
    ("asesor.none", "No asesors registered."),
    ("asesor.entry", "- {id}: {name} <{email}>"),
    ("asesor.entry_competency", "- {id}: {name} <{email}> ({competency})"),
    ("asesor.added", "Asesor {name} registered with id {id}."),
    ("asesor.removed", "Asesor {id} removed."),
    ("exam.templates.header", "Examination templates:"),
    ("exam.templates.none", "No templates published."),
    (
        "exam.templates.entry",
        "- {id}: {name} ({questions} questions, {minutes} minutes, pass mark \
         {passing})",
    ),
    ("exam.started", "Examination {id} started (status {status})."),
    (
        "exam.answer.saved",
        "Answer recorded for {question}; {answered}/{total} answered.",
    ),
    ("exam.fill.saved", "Answer sheet updated; {answered}/{total} answered."),
    ("exam.review.header", "Examination {id} ({status}):"),
    ("exam.review.entry", "- {question}: {answer}"),
    ("exam.review.unanswered", "(unanswered)"),
    ("exam.review.progress", "Progress: {answered}/{total} answered."),
    ("exam.submitted", "Examination {id} submitted for evaluation."),
    (
        "exam.result.pending",
        "Examination {id} is not evaluated yet (status {status}).",
    ),
    (
        "exam.result.summary",
        "Examination {id}: score {score}, {correct}/{total} correct.",
    ),
    ("exam.result.passed", "Result: PASSED"),
    ("exam.result.failed", "Result: FAILED"),
    (
        "exam.practice.summary",
        "Practice score: {score} ({correct}/{total} correct, pass mark \
         {passing}).",
    ),
    (
        "exam.invalid_option",
        "Choice {choice} is not an option for question {question}.",
    ),
    ("exam.sheet_failed", "Answer sheet error: {error}"),
    (
        "exam.not_answerable",
        "Examination {id} no longer accepts answers (status {status}).",
    ),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path}: {size} bytes exceeds the {limit} \
         byte limit.",
    ),
    ("input.parse_failed", "Failed to parse {kind} at {path}: {error}"),
    ("input.kind.answers", "answer sheet"),
    ("input.kind.key", "answer key"),
    ("input.kind.template", "exam template"),
];

/// Indonesian message catalog.
const CATALOG_ID: &[(&str, &str)] = &[
    ("main.version", "cert-portal {version}"),
    (
        "i18n.disclaimer.machine_translated",
        "Catatan: keluaran selain bahasa Inggris merupakan terjemahan mesin \
         dan mungkin kurang akurat. Teks bahasa Inggris tetap menjadi acuan.",
    ),
    (
        "i18n.lang.invalid_env",
        "Nilai tidak valid untuk {env}: {value}. Gunakan 'en' atau 'id'.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "keluaran"),
    ("output.write_failed", "Gagal menulis ke {stream}: {error}"),
    ("config.load_failed", "Gagal memuat konfigurasi: {error}"),
    ("config.validate.ok", "Konfigurasi valid."),
    ("api.request_failed", "Permintaan gagal: {error}"),
    (
        "session.none",
        "Tidak ada sesi aktif. Jalankan `cert-portal login` terlebih dahulu.",
    ),
    ("session.load_failed", "Gagal memuat sesi: {error}"),
    ("session.save_failed", "Gagal menyimpan sesi: {error}"),
    ("session.clear_failed", "Gagal menghapus sesi: {error}"),
    (
        "guard.loading",
        "Pemeriksaan sesi masih berlangsung; belum ada yang ditampilkan.",
    ),
    (
        "guard.redirect_login",
        "Autentikasi diperlukan; dialihkan ke {target}. Jalankan \
         `cert-portal login` terlebih dahulu.",
    ),
    (
        "guard.redirect_unauthorized",
        "Akses ditolak untuk tampilan ini; dialihkan ke {target}.",
    ),
    ("login.ok", "Masuk sebagai {username} ({role})."),
    ("login.landing", "Lanjutkan di {route}."),
    ("logout.ok", "Berhasil keluar."),
    ("logout.no_session", "Tidak ada sesi aktif; tidak ada yang perlu dilakukan."),
    ("whoami.user", "{username} <{email}> peran {role}"),
    ("form.invalid", "Validasi formulir gagal: {errors}"),
    ("register.ok", "Pendaftaran dikirim untuk {name}."),
    ("contact.ok", "Pesan terkirim. Balasan akan dikirim ke {email}."),
    ("schemes.header", "Skema sertifikasi:"),
    ("schemes.none", "Tidak ada skema."),
    ("schemes.entry", "- {name} ({slug}) [{category}]"),
    ("schemes.show.name", "Skema: {name}"),
    ("schemes.show.slug", "Slug: {slug}"),
    ("schemes.show.category", "Kategori: {category}"),
    ("schemes.show.description", "{description}"),
    ("partners.header", "Mitra industri:"),
    ("partners.none", "Tidak ada mitra."),
    ("partners.entry", "- {name} ({website})"),
    ("partners.website.none", "tanpa situs web"),
    ("provinces.header", "Provinsi:"),
    ("provinces.none", "Tidak ada provinsi."),
    ("provinces.entry", "- {id}: {name}"),
    ("schedules.header", "Jadwal asesmen:"),
    ("schedules.none", "Tidak ada jadwal."),
    ("schedules.entry", "- {name}: {start} sampai {end} ({location})"),
    ("schedules.location.none", "lokasi menyusul"),
    (
        "schedules.dates_invalid",
        "- {name}: rentang jadwal tidak valid ({start} sampai {end})",
    ),
    ("dashboard.header", "Dasbor untuk {username} ({role})"),
    ("dashboard.route", "Rute: {route}"),
    ("dashboard.admin.asesors", "Asesor terdaftar: {count}"),
    ("dashboard.asesor.schedules", "Jadwal terbit: {count}"),
    ("dashboard.asesi.exams", "Ujian Anda: {count}"),
    ("dashboard.asesi.exam_entry", "- {id}: {status}"),
    ("dashboard.asesi.exam_entry_scored", "- {id}: {status} (skor {score})"),
    ("asesor.header", "Direktori asesor:"),
    ("asesor.none", "Belum ada asesor terdaftar."),
    ("asesor.entry", "- {id}: {name} <{email}>"),
    ("asesor.entry_competency", "- {id}: {name} <{email}> ({competency})"),
    ("asesor.added", "Asesor {name} terdaftar dengan id {id}."),
    ("asesor.removed", "Asesor {id} dihapus."),
    ("exam.templates.header", "Templat ujian:"),
    ("exam.templates.none", "Belum ada templat."),
    (
        "exam.templates.entry",
        "- {id}: {name} ({questions} soal, {minutes} menit, batas lulus \
         {passing})",
    ),
    ("exam.started", "Ujian {id} dimulai (status {status})."),
    (
        "exam.answer.saved",
        "Jawaban direkam untuk {question}; {answered}/{total} terjawab.",
    ),
    (
        "exam.fill.saved",
        "Lembar jawaban diperbarui; {answered}/{total} terjawab.",
    ),
    ("exam.review.header", "Ujian {id} ({status}):"),
    ("exam.review.entry", "- {question}: {answer}"),
    ("exam.review.unanswered", "(belum dijawab)"),
    ("exam.review.progress", "Kemajuan: {answered}/{total} terjawab."),
    ("exam.submitted", "Ujian {id} dikirim untuk evaluasi."),
    ("exam.result.pending", "Ujian {id} belum dievaluasi (status {status})."),
    (
        "exam.result.summary",
        "Ujian {id}: skor {score}, {correct}/{total} benar.",
    ),
    ("exam.result.passed", "Hasil: LULUS"),
    ("exam.result.failed", "Hasil: TIDAK LULUS"),
    (
        "exam.practice.summary",
        "Skor latihan: {score} ({correct}/{total} benar, batas lulus \
         {passing}).",
    ),
    (
        "exam.invalid_option",
        "Pilihan {choice} bukan opsi untuk soal {question}.",
    ),
    ("exam.sheet_failed", "Kesalahan lembar jawaban: {error}"),
    (
        "exam.not_answerable",
        "Ujian {id} tidak lagi menerima jawaban (status {status}).",
    ),
    ("input.read_failed", "Gagal membaca {kind} di {path}: {error}"),
    (
        "input.read_too_large",
        "Menolak membaca {kind} di {path}: {size} byte melebihi batas {limit} \
         byte.",
    ),
    ("input.parse_failed", "Gagal mengurai {kind} di {path}: {error}"),
    ("input.kind.answers", "lembar jawaban"),
    ("input.kind.key", "kunci jawaban"),
    ("input.kind.template", "templat ujian"),
];

/// Returns the raw catalog entries for a locale, in declaration order.
#[cfg(test)]
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Id => CATALOG_ID,
    }
}

/// Returns the message catalog for a locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    match locale {
        Locale::En => {
            /// Lazily built English lookup map.
            static EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
            EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect())
        }
        Locale::Id => {
            /// Lazily built Indonesian lookup map.
            static ID_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
            ID_MAP.get_or_init(|| CATALOG_ID.iter().copied().collect())
        }
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates a message key with placeholder substitution.
///
/// Resolution falls back from the active locale to English and finally to the
/// key itself. Placeholders are written as `{name}` in catalog entries and
/// replaced by the matching argument value; arguments without a matching
/// placeholder are ignored.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

/// Translates a message key with optional named arguments.
///
/// Arguments are written as `name = value` pairs; each value is rendered with
/// `to_string` before substitution.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $($crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),)*
        ];
        $crate::i18n::translate($key, args)
    }};
}
