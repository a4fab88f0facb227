//! Read-only document scan.

use lol_html::{element, rewrite_str, RewriteStrSettings};

/// Attributes of the first `<form>` element in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormElement {
    pub action: Option<String>,
}

/// Attributes of an `<input>` element that the validator and merger care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputElement {
    pub id: Option<String>,
    pub name: Option<String>,
    pub input_type: Option<String>,
}

impl InputElement {
    /// `true` when the `type` attribute is `checkbox`, ignoring ASCII case.
    pub fn is_checkbox(&self) -> bool {
        self.input_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
    }

    /// `true` when the `name` attribute equals `name` exactly (case-sensitive).
    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// Everything a scan pass collected, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedDocument {
    /// The first `<form>` element, if any.
    pub form: Option<FormElement>,
    /// Every `<input>` element anywhere in the document.
    pub inputs: Vec<InputElement>,
}

impl ScannedDocument {
    /// `true` if any input carries exactly this `name`.
    pub fn has_input_named(&self, name: &str) -> bool {
        self.inputs.iter().any(|input| input.has_name(name))
    }

    /// The last checkbox input in document order.
    pub fn last_checkbox(&self) -> Option<&InputElement> {
        self.inputs.iter().rev().find(|input| input.is_checkbox())
    }
}

/// Scan `html` for the first form and all inputs.
///
/// Never fails. If the tokenizer gives up part-way through, whatever was
/// collected up to that point is returned.
pub fn scan(html: &str) -> ScannedDocument {
    let mut form: Option<FormElement> = None;
    let mut inputs: Vec<InputElement> = Vec::new();

    // The rewritten output is discarded; an error only means the scan stopped
    // early, and what was collected so far still stands.
    let _ = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("form", |el| {
                    if form.is_none() {
                        form = Some(FormElement {
                            action: el.get_attribute("action"),
                        });
                    }
                    Ok(())
                }),
                element!("input", |el| {
                    inputs.push(InputElement {
                        id: el.get_attribute("id"),
                        name: el.get_attribute("name"),
                        input_type: el.get_attribute("type"),
                    });
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    );

    ScannedDocument { form, inputs }
}
