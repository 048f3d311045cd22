//! CLI support for cordon-lang
//!
//! Provides programmatic access to the `cordon` commands so other tools can
//! embed them.

mod check;
mod field;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use field::{FieldOptions, execute_field};

use std::io;

use thiserror::Error;

use crate::Context;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Expression rejected or context unusable
    #[error(transparent)]
    Cordon(#[from] crate::CordonError),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,
}

/// Parses the JSON input into a context, or errors when there is none.
fn load_context(input: Option<&str>) -> Result<Context, CliError> {
    let json_str = input.ok_or(CliError::NoInput)?;
    let json_value: serde_json::Value = serde_json::from_str(json_str)?;
    Ok(Context::from_json(json_value)?)
}
