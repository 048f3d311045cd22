//! Run a single structured field condition

use super::{CliError, load_context};
use crate::{FieldOperator, Sandbox, convert::json_to_value};

/// Options for the field command
#[derive(Debug, Clone)]
pub struct FieldOptions {
    /// Path to the field, e.g. `item.count`
    pub path: String,
    /// One of `=== !== == != > >= < <=`
    pub operator: String,
    /// The literal to compare with, as JSON
    pub literal: String,
    /// JSON object used as the context
    pub input: Option<String>,
}

pub fn execute_field(sandbox: &Sandbox, options: &FieldOptions) -> Result<bool, CliError> {
    let operator: FieldOperator = options.operator.parse()?;
    let literal = json_to_value(serde_json::from_str(&options.literal)?);
    let context = load_context(options.input.as_deref())?;
    Ok(sandbox.evaluate_field_condition(&options.path, operator, &literal, &context)?)
}
