pub mod artifact;
pub mod auth;
pub mod form;
pub mod generate;
pub mod legacy;
