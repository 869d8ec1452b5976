//! Codefolio front end.
//!
//! Typed ports over the Codefolio REST API, reqwest adapters implementing
//! them, and the view-state objects the `codefolio` terminal client renders.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod views;

pub use config::{ConfigError, FrontendSettings};
