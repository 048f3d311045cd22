use std::{borrow::Cow, cmp::Ordering, collections::HashMap};

use crate::{
    ast::{BinOp, Expr, LogicalOp, UnaryOp},
    convert::json_to_value,
    error::CordonError,
    value::Value,
};

/// Identifier bindings an expression is evaluated against.
///
/// The evaluator only ever reads from a context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    bindings: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.bindings.insert(name.into(), value.into());
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Builds a context from a JSON object; each top-level key becomes a binding.
    pub fn from_json(json: serde_json::Value) -> Result<Self, CordonError> {
        match json_to_value(json) {
            Value::Object(bindings) => Ok(Context { bindings }),
            other => Err(CordonError::InvalidContext(other.type_name())),
        }
    }
}

impl From<HashMap<String, Value>> for Context {
    fn from(bindings: HashMap<String, Value>) -> Self {
        Context { bindings }
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Context {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// Tree-walking evaluator.
///
/// Evaluation cannot fail: missing bindings and missing properties come
/// back as `undefined`, and arithmetic follows IEEE rules (`1 / 0` is
/// `Infinity`). It holds no state, so one evaluator can serve any number of
/// threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Evaluator
    }

    /// Reduces `expr` to a value against `context`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cordon_lang::{Context, Evaluator, Value, parser, tokenize};
    ///
    /// let expr = parser::parse(tokenize("price * 2").unwrap()).unwrap();
    /// let context = Context::new().with("price", 21.0);
    ///
    /// assert_eq!(Evaluator::new().eval(&expr, &context), Value::Number(42.0));
    /// ```
    pub fn eval(&self, expr: &Expr, context: &Context) -> Value {
        self.eval_ref(expr, context).into_owned()
    }

    /// Lookups borrow from the context and the tree; only computed values
    /// are allocated.
    fn eval_ref<'a>(&self, expr: &'a Expr, context: &'a Context) -> Cow<'a, Value> {
        match expr {
            Expr::Literal(value) => Cow::Borrowed(value),
            Expr::Identifier(name) => context
                .get(name)
                .map(Cow::Borrowed)
                .unwrap_or(Cow::Owned(Value::Undefined)),
            Expr::Member {
                object, property, ..
            } => {
                let object = self.eval_ref(object, context);
                if object.is_nullish() {
                    return Cow::Owned(Value::Undefined);
                }
                let key = self.eval_ref(property, context);
                match object {
                    Cow::Borrowed(object) => object.member(&key),
                    Cow::Owned(object) => Cow::Owned(object.member(&key).into_owned()),
                }
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval_ref(left, context);
                let right = self.eval_ref(right, context);
                Cow::Owned(apply_binop(*op, &left, &right))
            }
            Expr::Logical { op, left, right } => {
                let left = self.eval_ref(left, context);
                let take_left = match op {
                    LogicalOp::And => !left.is_truthy(),
                    LogicalOp::Or => left.is_truthy(),
                };
                if take_left {
                    left
                } else {
                    self.eval_ref(right, context)
                }
            }
            Expr::Unary { op, operand } => {
                let operand = self.eval_ref(operand, context);
                Cow::Owned(match op {
                    UnaryOp::Not => Value::Boolean(!operand.is_truthy()),
                    UnaryOp::Negate => Value::Number(-operand.to_number()),
                })
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                if self.eval_ref(test, context).is_truthy() {
                    self.eval_ref(consequent, context)
                } else {
                    self.eval_ref(alternate, context)
                }
            }
        }
    }
}

pub(crate) fn apply_binop(op: BinOp, left: &Value, right: &Value) -> Value {
    match op {
        BinOp::LooseEqual => Value::Boolean(left.loose_eq(right)),
        BinOp::LooseNotEqual => Value::Boolean(!left.loose_eq(right)),
        BinOp::StrictEqual => Value::Boolean(left.strict_eq(right)),
        BinOp::StrictNotEqual => Value::Boolean(!left.strict_eq(right)),
        BinOp::LessThan => Value::Boolean(left.compare(right) == Some(Ordering::Less)),
        BinOp::GreaterThan => Value::Boolean(left.compare(right) == Some(Ordering::Greater)),
        BinOp::LessEqual => Value::Boolean(matches!(
            left.compare(right),
            Some(Ordering::Less | Ordering::Equal)
        )),
        BinOp::GreaterEqual => Value::Boolean(matches!(
            left.compare(right),
            Some(Ordering::Greater | Ordering::Equal)
        )),
        BinOp::Add => left.add(right),
        BinOp::Subtract => Value::Number(left.to_number() - right.to_number()),
        BinOp::Multiply => Value::Number(left.to_number() * right.to_number()),
        BinOp::Divide => Value::Number(left.to_number() / right.to_number()),
        BinOp::Modulo => Value::Number(left.to_number() % right.to_number()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SandboxConfig;
    use crate::parser::parse_source;
    use serde_json::json;

    fn eval(source: &str, context: serde_json::Value) -> Value {
        let expr = parse_source(source, &SandboxConfig::default()).unwrap();
        Evaluator::new().eval(&expr, &Context::from_json(context).unwrap())
    }

    #[test]
    fn test_logical_returns_operand() {
        assert_eq!(eval("0 || 'fallback'", json!({})), Value::String("fallback".into()));
        assert_eq!(eval("'x' && 5", json!({})), Value::Number(5.0));
        assert_eq!(eval("'' && 5", json!({})), Value::String(String::new()));
        assert_eq!(eval("name || 'anon'", json!({"name": "bo"})), Value::String("bo".into()));
    }

    #[test]
    fn test_arithmetic_coercion() {
        assert_eq!(eval("'3' * '4'", json!({})), Value::Number(12.0));
        assert_eq!(eval("1 + '2'", json!({})), Value::String("12".into()));
        assert_eq!(eval("true + 1", json!({})), Value::Number(2.0));
        assert_eq!(eval("7 % 4", json!({})), Value::Number(3.0));
        assert_eq!(eval("1 / 0", json!({})), Value::Number(f64::INFINITY));
        assert_eq!(eval("-'5'", json!({})), Value::Number(-5.0));
    }

    #[test]
    fn test_member_on_computed_value() {
        assert_eq!(eval("(a ? list : other)[1]", json!({"a": true, "list": [1, 2]})), Value::Number(2.0));
        assert_eq!(eval("('ab' + 'cd').length", json!({})), Value::Number(4.0));
    }

    #[test]
    fn test_context_must_be_object() {
        assert_eq!(
            Context::from_json(json!([1, 2])),
            Err(CordonError::InvalidContext("array"))
        );
    }
}
