//! Shared helpers for the behaviour suites.

mod doubles;

pub use doubles::*;
