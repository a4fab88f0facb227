//! Generated artifact naming convention.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::FormId;

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Number of leading characters of the form id used in the filename.
const ID_PREFIX_LEN: usize = 8;

/// Generate the artifact filename for a form.
///
/// Convention: `{slug}-{id8}.html`
///
/// - `slug` = lower-cased form name, every run of characters outside
///   `[a-z0-9]` collapsed to a single `-`
/// - `id8` = first eight characters of the hyphenated form id
///
/// # Examples
///
/// ```
/// use formbridge_core::naming::artifact_filename;
/// use uuid::Uuid;
///
/// let id = Uuid::parse_str("3f2a9c1e-0000-4000-8000-000000000000").unwrap();
/// assert_eq!(artifact_filename("AI Webinar", id), "ai-webinar-3f2a9c1e.html");
/// ```
pub fn artifact_filename(form_name: &str, form_id: FormId) -> String {
    let lower = form_name.to_lowercase();
    let slug = NON_ALNUM_RE.replace_all(&lower, "-");
    let id = form_id.hyphenated().to_string();
    format!("{slug}-{}.html", &id[..ID_PREFIX_LEN])
}

/// `true` if `filename` looks like something [`artifact_filename`] produced:
/// a bare `*.html` name with no path separators.
pub fn is_artifact_filename(filename: &str) -> bool {
    filename.len() > ".html".len()
        && filename.ends_with(".html")
        && filename
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
        && !filename.contains("..")
}
