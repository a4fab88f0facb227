//! Domain logic for FormBridge.
//!
//! Everything here is pure: no database, no HTTP, no shared mutable state.
//! The API crate wires these pieces to persistence and the artifact store.

pub mod error;
pub mod generator;
pub mod html;
pub mod naming;
pub mod types;
pub mod validation;
pub mod widget_url;
