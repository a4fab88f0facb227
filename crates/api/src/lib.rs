//! FormBridge API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! artifact storage) so integration tests and the binary entrypoint can
//! both access them.

pub mod app;
pub mod artifacts;
pub mod auth;
pub mod config;
pub mod error;
pub mod generation_lock;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
