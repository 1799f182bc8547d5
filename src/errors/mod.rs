//! Error types and diagnostics for the front end.
//!
//! This module defines the errors reported while turning source lines into
//! trees. It includes:
//!
//! - Error structures with source position information
//! - A two-tier severity model (recoverable warnings, line-fatal errors)
//! - The diagnostic sink the block structurer reports into

pub mod errors;

#[cfg(test)]
mod tests;
