use std::{fmt, str::FromStr, sync::Arc};

use crate::{
    ast::{BinOp, Expr},
    error::CordonError,
    evaluator::{Context, Evaluator},
    value::Value,
};

/// A screened, parsed condition ready for repeated evaluation.
///
/// Cloning is cheap and the tree is never touched after construction, so a
/// single compiled condition can be shared across threads and evaluated
/// against many contexts.
///
/// # Examples
///
/// ```
/// use cordon_lang::{Context, compile};
///
/// let adult = compile(r#"age >= 18 && status === "active""#).unwrap();
///
/// let context = Context::new().with("age", 17.0).with("status", "active");
/// assert!(!adult.evaluate(&context));
/// ```
#[derive(Debug, Clone)]
pub struct CompiledCondition {
    source: Arc<str>,
    ast: Arc<Expr>,
}

impl CompiledCondition {
    pub(crate) fn new(source: &str, ast: Expr) -> Self {
        CompiledCondition {
            source: Arc::from(source),
            ast: Arc::new(ast),
        }
    }

    /// Evaluates and coerces the result to a boolean.
    pub fn evaluate(&self, context: &Context) -> bool {
        self.evaluate_value(context).is_truthy()
    }

    /// Evaluates without boolean coercion.
    pub fn evaluate_value(&self, context: &Context) -> Value {
        Evaluator::new().eval(&self.ast, context)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Expr {
        &self.ast
    }
}

impl fmt::Display for CompiledCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// The comparisons a field condition may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOperator {
    StrictEqual,
    StrictNotEqual,
    LooseEqual,
    LooseNotEqual,
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,
}

impl FieldOperator {
    pub const ALL: [FieldOperator; 8] = [
        FieldOperator::StrictEqual,
        FieldOperator::StrictNotEqual,
        FieldOperator::LooseEqual,
        FieldOperator::LooseNotEqual,
        FieldOperator::GreaterThan,
        FieldOperator::GreaterEqual,
        FieldOperator::LessThan,
        FieldOperator::LessEqual,
    ];

    pub fn as_binop(self) -> BinOp {
        match self {
            FieldOperator::StrictEqual => BinOp::StrictEqual,
            FieldOperator::StrictNotEqual => BinOp::StrictNotEqual,
            FieldOperator::LooseEqual => BinOp::LooseEqual,
            FieldOperator::LooseNotEqual => BinOp::LooseNotEqual,
            FieldOperator::GreaterThan => BinOp::GreaterThan,
            FieldOperator::GreaterEqual => BinOp::GreaterEqual,
            FieldOperator::LessThan => BinOp::LessThan,
            FieldOperator::LessEqual => BinOp::LessEqual,
        }
    }

    pub fn symbol(self) -> &'static str {
        self.as_binop().symbol()
    }
}

impl fmt::Display for FieldOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for FieldOperator {
    type Err = CordonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldOperator::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| CordonError::UnknownOperator(s.to_string()))
    }
}
