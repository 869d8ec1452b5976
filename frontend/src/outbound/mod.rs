//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed adapters for the Codefolio REST API

pub mod http;
