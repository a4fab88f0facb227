//! Attribute rewrite of the first `<form>` element.

use lol_html::errors::RewritingError;
use lol_html::{element, rewrite_str, RewriteStrSettings};

/// Set each `(name, value)` pair as an attribute on the first `<form>` element
/// and return the re-serialized document.
///
/// Attributes that already exist are overwritten. Later `<form>` elements and
/// everything outside the first form's start tag are emitted unchanged. A
/// document without a form passes through untouched.
pub fn set_form_attributes(
    html: &str,
    attributes: &[(&str, &str)],
) -> Result<String, RewritingError> {
    let mut rewritten = false;

    let out = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("form", |el| {
                if rewritten {
                    return Ok(());
                }
                rewritten = true;
                for (name, value) in attributes {
                    el.set_attribute(name, value)?;
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    );
    out
}
