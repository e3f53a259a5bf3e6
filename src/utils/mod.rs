//! Shared helpers for code-shape checks and configuration validation.

pub mod validation;
