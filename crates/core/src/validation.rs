//! Structural validation of source-provider form HTML -- pure logic, no I/O.

use serde::Serialize;

use crate::html::{scan, ScannedDocument};

/// Substring the first form's `action` must contain.
pub const SOURCE_PROVIDER_DOMAIN: &str = "infusionsoft.com";

pub const EMAIL_FIELD: &str = "inf_field_Email";
pub const FORM_XID_FIELD: &str = "inf_form_xid";
pub const FORM_NAME_FIELD: &str = "inf_form_name";
pub const FIRST_NAME_FIELD: &str = "inf_field_FirstName";
pub const LAST_NAME_FIELD: &str = "inf_field_LastName";
pub const PHONE_FIELD: &str = "inf_field_Phone1";

/// Required inputs, checked in this order, with the label used in the error.
const REQUIRED_FIELDS: [(&str, &str); 3] = [
    (EMAIL_FIELD, "Email field"),
    (FORM_XID_FIELD, "Form XID"),
    (FORM_NAME_FIELD, "Form name"),
];

/// A checkbox whose `name` contains any of these counts as a consent control.
const CONSENT_NAME_FRAGMENTS: [&str; 3] = ["consent", "sms", "opt"];

pub const NO_FORM_ERROR: &str = "No form element found in HTML";
pub const ACTION_URL_ERROR: &str = "Invalid or missing Infusionsoft action URL";
pub const NO_CONSENT_WARNING: &str =
    "No SMS consent checkbox found. Users will not be able to opt-in for SMS notifications.";
pub const NO_FIRST_NAME_WARNING: &str = "First name field not found";
pub const NO_LAST_NAME_WARNING: &str = "Last name field not found";
pub const NO_PHONE_WARNING: &str = "Phone field not found";

/// Which of the interesting fields were found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldsFound {
    pub email: bool,
    pub first_name: bool,
    pub last_name: bool,
    pub phone: bool,
    pub consent: bool,
}

/// Outcome of [`validate`]. Errors block generation; warnings never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Absent when there was no form to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields_found: Option<FieldsFound>,
}

/// Validate a pasted source-provider form.
pub fn validate(html: &str) -> ValidationResult {
    validate_document(&scan(html))
}

/// Validate an already scanned document.
pub fn validate_document(doc: &ScannedDocument) -> ValidationResult {
    let Some(form) = &doc.form else {
        return ValidationResult {
            is_valid: false,
            errors: vec![NO_FORM_ERROR.to_string()],
            warnings: Vec::new(),
            fields_found: None,
        };
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let action_ok = form
        .action
        .as_deref()
        .is_some_and(|action| action.contains(SOURCE_PROVIDER_DOMAIN));
    if !action_ok {
        errors.push(ACTION_URL_ERROR.to_string());
    }

    for (name, label) in REQUIRED_FIELDS {
        if !doc.has_input_named(name) {
            errors.push(format!("Missing required field: {label}"));
        }
    }

    let consent = has_consent_checkbox(doc);
    if !consent {
        warnings.push(NO_CONSENT_WARNING.to_string());
    }

    let first_name = doc.has_input_named(FIRST_NAME_FIELD);
    let last_name = doc.has_input_named(LAST_NAME_FIELD);
    if !first_name {
        warnings.push(NO_FIRST_NAME_WARNING.to_string());
    }
    if !last_name {
        warnings.push(NO_LAST_NAME_WARNING.to_string());
    }

    let phone = doc.has_input_named(PHONE_FIELD);
    if !phone {
        warnings.push(NO_PHONE_WARNING.to_string());
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        fields_found: Some(FieldsFound {
            email: doc.has_input_named(EMAIL_FIELD),
            first_name,
            last_name,
            phone,
            consent,
        }),
    }
}

fn has_consent_checkbox(doc: &ScannedDocument) -> bool {
    doc.inputs.iter().any(|input| {
        input.is_checkbox()
            && input.name.as_deref().is_some_and(|name| {
                CONSENT_NAME_FRAGMENTS
                    .iter()
                    .any(|fragment| name.contains(fragment))
            })
    })
}
