//! Screen and evaluate expressions against JSON input

use super::{CliError, load_context};
use crate::{Sandbox, convert::value_to_json};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The expression to run
    pub expression: String,
    /// JSON object used as the context
    pub input: Option<String>,
    /// Only screen and parse, don't evaluate
    pub syntax_only: bool,
    /// Coerce the result to a boolean, as a compiled condition does
    pub condition: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Expression passed screening and parsing
    Permitted,
    /// Expression evaluated to this value
    Value(serde_json::Value),
    /// Condition evaluated to this boolean
    Condition(bool),
}

/// Execute a cordon check operation
pub fn execute_check(sandbox: &Sandbox, options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expression = &options.expression;

    if options.syntax_only {
        sandbox.screen(expression)?;
        return Ok(CheckResult::Permitted);
    }

    if options.condition {
        let condition = sandbox.compile(expression)?;
        let context = load_context(options.input.as_deref())?;
        return Ok(CheckResult::Condition(condition.evaluate(&context)));
    }

    let expr = sandbox.screen(expression)?;
    let context = load_context(options.input.as_deref())?;
    let result = crate::Evaluator::new().eval(&expr, &context);
    Ok(CheckResult::Value(value_to_json(result)))
}
