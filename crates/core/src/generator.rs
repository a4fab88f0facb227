//! Form merger: annotates a validated source-provider form with the target
//! provider's embed attributes and renders it into the registration template.
//!
//! The merger performs no validation of its own. Callers run
//! [`crate::validation::validate`] first and only generate when it reports
//! `is_valid`.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use lol_html::errors::RewritingError;

use crate::html::{scan, set_form_attributes};
use crate::types::Timestamp;

/// Placeholder replaced (first occurrence only) by the merged form markup.
pub const FORM_PLACEHOLDER: &str = "{{FORM_HTML}}";
/// Placeholder replaced (every occurrence) by the generation timestamp.
pub const TIMESTAMP_PLACEHOLDER: &str = "{{TIMESTAMP}}";

pub const SESSION_ID_ATTR: &str = "data-wf-session-id";
pub const WIDGET_ID_ATTR: &str = "data-wf-widget-id";
pub const WIDGET_VERSION_ATTR: &str = "data-wf-widget-version";
pub const WIDGET_NAME_ATTR: &str = "data-wf-widget-name";
pub const BEARER_TOKEN_ATTR: &str = "data-wf-bearer-token";
pub const CONSENT_ID_ATTR: &str = "data-consent-id";

/// Integration-name marker written to [`WIDGET_NAME_ATTR`].
pub const WIDGET_NAME: &str = "Embed";

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Failed to load template {path}: {source}")]
    Template {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rewrite form HTML: {0}")]
    Rewrite(#[from] RewritingError),
}

/// Everything the merger needs for one form.
#[derive(Debug, Clone, Copy)]
pub struct GenerateInput<'a> {
    pub source_html: &'a str,
    pub session_id: &'a str,
    pub widget_id: &'a str,
    pub widget_version: &'a str,
    pub secret_token: &'a str,
}

/// Renders merged forms into a registration page template.
#[derive(Debug, Clone)]
pub struct FormGenerator {
    template: String,
}

impl FormGenerator {
    /// Use `template` as the page skeleton. It should contain one
    /// [`FORM_PLACEHOLDER`] and any number of [`TIMESTAMP_PLACEHOLDER`]s.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Load the template from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GenerateError> {
        let path = path.as_ref();
        let template = std::fs::read_to_string(path).map_err(|source| GenerateError::Template {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(template))
    }

    /// Merge and render using the current time.
    pub fn generate(&self, input: &GenerateInput<'_>) -> Result<String, GenerateError> {
        self.generate_at(input, Utc::now())
    }

    /// Merge and render with an explicit timestamp.
    pub fn generate_at(
        &self,
        input: &GenerateInput<'_>,
        now: Timestamp,
    ) -> Result<String, GenerateError> {
        let form_html = merge_form(input)?;
        Ok(self.render(&form_html, now))
    }

    fn render(&self, form_html: &str, now: Timestamp) -> String {
        let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.template
            .replacen(FORM_PLACEHOLDER, form_html, 1)
            .replace(TIMESTAMP_PLACEHOLDER, &stamp)
    }
}

/// Set the embed attributes on the first form of `input.source_html`.
///
/// The consent id comes from the last checkbox in the document (its `id`,
/// else its `name`). This differs from the name-based consent check
/// the validator uses.
pub fn merge_form(input: &GenerateInput<'_>) -> Result<String, GenerateError> {
    let consent_id = consent_id(input.source_html);

    let mut attributes = vec![
        (SESSION_ID_ATTR, input.session_id),
        (WIDGET_ID_ATTR, input.widget_id),
        (WIDGET_VERSION_ATTR, input.widget_version),
        (WIDGET_NAME_ATTR, WIDGET_NAME),
        (BEARER_TOKEN_ATTR, input.secret_token),
    ];
    if let Some(consent_id) = consent_id.as_deref() {
        attributes.push((CONSENT_ID_ATTR, consent_id));
    }

    Ok(set_form_attributes(input.source_html, &attributes)?)
}

fn consent_id(html: &str) -> Option<String> {
    let doc = scan(html);
    let checkbox = doc.last_checkbox()?;
    let found = [&checkbox.id, &checkbox.name]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .cloned();
    found
}
