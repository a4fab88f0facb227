//! HTML parser/query adapter.
//!
//! Built on `lol_html`'s streaming rewriter, which tolerates malformed markup
//! and re-emits every byte it does not touch. Two passes are offered:
//!
//! - [`scan`] -- read-only; collects the first `<form>` and every `<input>`.
//! - [`set_form_attributes`] -- writes a new attribute set onto the first
//!   `<form>` and serializes the document.

pub mod rewrite;
pub mod scan;

pub use rewrite::set_form_attributes;
pub use scan::{scan, FormElement, InputElement, ScannedDocument};
