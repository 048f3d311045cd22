//! # Cordon
//!
//! A sandboxed expression language for conditions written by people you do
//! not fully trust, evaluated against data you supply.
//!
//! ```
//! use cordon_lang::{Context, evaluate, Value};
//! use serde_json::json;
//!
//! let context = Context::from_json(json!({
//!     "order": { "total": 250, "status": "paid" }
//! })).unwrap();
//!
//! let result = evaluate(r#"order.total > 100 && order.status === "paid""#, &context).unwrap();
//! assert_eq!(result, Value::Boolean(true));
//! ```
//!
//! Text goes through the denylist [`screener`], the [`lexer`] and the
//! [`parser`]; the resulting [`Expr`] is reduced by the [`Evaluator`]. There
//! are no calls, no assignments and no way to name anything outside the
//! context, and evaluation itself never fails.

pub mod ast;
pub mod condition;
pub mod config;
pub mod convert;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod sandbox;
pub mod screener;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{BinOp, Expr, LogicalOp, Span, Token, TokenKind, UnaryOp};
pub use condition::{CompiledCondition, FieldOperator};
pub use config::SandboxConfig;
pub use error::{CordonError, LexError, ParseError, RejectReason};
pub use evaluator::{Context, Evaluator};
pub use lexer::{Lexer, tokenize};
pub use parser::{Parser, parse};
pub use sandbox::Sandbox;
pub use screener::DenyCategory;
pub use value::Value;

/// True when `expression` is free of blocked names and parses completely.
pub fn is_safe(expression: &str) -> bool {
    Sandbox::default().is_safe(expression)
}

/// Screens, parses and evaluates `expression` against `context`.
pub fn evaluate(expression: &str, context: &Context) -> Result<Value, CordonError> {
    Sandbox::default().evaluate(expression, context)
}

/// Screens and parses `expression` once for repeated evaluation.
pub fn compile(expression: &str) -> Result<CompiledCondition, CordonError> {
    Sandbox::default().compile(expression)
}

/// Compares the value found at `field_path` with `literal` using `operator`.
pub fn evaluate_field_condition(
    field_path: &str,
    operator: FieldOperator,
    literal: &Value,
    context: &Context,
) -> Result<bool, CordonError> {
    Sandbox::default().evaluate_field_condition(field_path, operator, literal, context)
}
