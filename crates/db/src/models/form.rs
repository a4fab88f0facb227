//! Form entity model and DTOs.

use formbridge_core::types::{DbId, FormId, Timestamp};
use formbridge_core::widget_url::parse_widget_url;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A form row from the `forms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Form {
    pub id: FormId,
    pub user_id: DbId,
    pub name: String,
    pub source_html: String,
    pub widget_url: Option<String>,
    pub widget_id: Option<String>,
    pub widget_version: Option<String>,
    pub session_id: Option<String>,
    pub status_id: StatusId,
    pub custom_fields: serde_json::Value,
    pub settings: serde_json::Value,
    pub generated_filename: Option<String>,
    pub generated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List-view projection of a form (no HTML blob, no structured fields).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FormSummary {
    pub id: FormId,
    pub name: String,
    pub widget_id: Option<String>,
    pub widget_version: Option<String>,
    pub status_id: StatusId,
    pub generated_filename: Option<String>,
    pub generated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new form. The owner comes from the authenticated caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateForm {
    pub name: String,
    pub source_html: Option<String>,
    pub widget_url: Option<String>,
    pub widget_id: Option<String>,
    pub widget_version: Option<String>,
    pub session_id: Option<String>,
    /// Defaults to 1 (Draft) if omitted.
    pub status_id: Option<StatusId>,
    pub custom_fields: Option<serde_json::Value>,
    pub settings: Option<serde_json::Value>,
}

impl CreateForm {
    /// Overwrite `widget_id` / `widget_version` with the values parsed from
    /// `widget_url`, when it parses.
    pub fn apply_widget_url(&mut self) {
        if let Some(parsed) = parse_widget_url(self.widget_url.as_deref()) {
            self.widget_id = Some(parsed.widget_id);
            self.widget_version = Some(parsed.version);
        }
    }
}

/// DTO for updating an existing form. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateForm {
    pub name: Option<String>,
    pub source_html: Option<String>,
    pub widget_url: Option<String>,
    pub widget_id: Option<String>,
    pub widget_version: Option<String>,
    pub session_id: Option<String>,
    pub status_id: Option<StatusId>,
    pub custom_fields: Option<serde_json::Value>,
    pub settings: Option<serde_json::Value>,
}

impl UpdateForm {
    /// Same rule as [`CreateForm::apply_widget_url`], except that without a
    /// `widget_url` in the patch the row's `stored_url` is used instead, so
    /// widget id and version never drift from the stored URL.
    pub fn apply_widget_url(&mut self, stored_url: Option<&str>) {
        let effective = self.widget_url.as_deref().or(stored_url);
        if let Some(parsed) = parse_widget_url(effective) {
            self.widget_id = Some(parsed.widget_id);
            self.widget_version = Some(parsed.version);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_url_overwrites_explicit_widget_fields() {
        let mut input = CreateForm {
            name: "Webinar".to_string(),
            widget_url: Some("https://app.example.com/widgets/42/7/elements".to_string()),
            widget_id: Some("1".to_string()),
            widget_version: Some("1".to_string()),
            ..Default::default()
        };
        input.apply_widget_url();
        assert_eq!(input.widget_id.as_deref(), Some("42"));
        assert_eq!(input.widget_version.as_deref(), Some("7"));
    }

    #[test]
    fn unparseable_url_keeps_explicit_widget_fields() {
        let mut input = UpdateForm {
            widget_url: Some("https://app.example.com/widgets/42/elements".to_string()),
            widget_id: Some("9".to_string()),
            ..Default::default()
        };
        input.apply_widget_url(None);
        assert_eq!(input.widget_id.as_deref(), Some("9"));
        assert_eq!(input.widget_version, None);
    }

    #[test]
    fn no_url_is_a_no_op() {
        let mut input = UpdateForm::default();
        input.apply_widget_url(None);
        assert!(input.widget_id.is_none());
    }

    #[test]
    fn stored_url_wins_over_patched_widget_fields() {
        let mut input = UpdateForm {
            widget_id: Some("9".to_string()),
            ..Default::default()
        };
        input.apply_widget_url(Some("https://app.example.com/widgets/42/7/elements"));
        assert_eq!(input.widget_id.as_deref(), Some("42"));
        assert_eq!(input.widget_version.as_deref(), Some("7"));
    }

    #[test]
    fn patched_url_takes_precedence_over_stored_url() {
        let mut input = UpdateForm {
            widget_url: Some("/widgets/5/1/elements".to_string()),
            ..Default::default()
        };
        input.apply_widget_url(Some("/widgets/42/7/elements"));
        assert_eq!(input.widget_id.as_deref(), Some("5"));
        assert_eq!(input.widget_version.as_deref(), Some("1"));
    }
}
