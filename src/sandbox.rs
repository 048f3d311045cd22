//! The screened entry points.
//!
//! Every path from expression text to a value goes through
//! [`Sandbox::screen`]: length limit, denylist, then a full lex and parse
//! under the nesting limit. Anything that fails is a
//! [`CordonError::Rejected`] before a single node is evaluated.

use crate::{
    ast::Expr,
    condition::{CompiledCondition, FieldOperator},
    config::SandboxConfig,
    error::{CordonError, RejectReason},
    evaluator::{Context, Evaluator, apply_binop},
    parser, screener,
    value::Value,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sandbox {
    config: SandboxConfig,
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Self {
        Sandbox { config }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Runs every check and hands back the parsed tree on success.
    pub fn screen(&self, expression: &str) -> Result<Expr, CordonError> {
        self.check(expression).map_err(|reason| {
            log::warn!("rejected expression `{}`: {}", expression, reason);
            CordonError::rejected(expression, reason)
        })
    }

    fn check(&self, expression: &str) -> Result<Expr, RejectReason> {
        if expression.trim().is_empty() {
            return Err(RejectReason::Empty);
        }

        let limit = self.config.max_expression_length;
        if expression.chars().count() > limit {
            return Err(RejectReason::TooLong { limit });
        }

        if let Some(category) = screener::find_blocked(expression) {
            return Err(RejectReason::Denylisted(category));
        }

        Ok(parser::parse_source(expression, &self.config)?)
    }

    /// True when `expression` passes the denylist and parses completely.
    pub fn is_safe(&self, expression: &str) -> bool {
        self.check(expression).is_ok()
    }

    /// Screens, parses and evaluates `expression` in one go.
    pub fn evaluate(&self, expression: &str, context: &Context) -> Result<Value, CordonError> {
        let expr = self.screen(expression)?;
        Ok(Evaluator::new().eval(&expr, context))
    }

    /// Screens and parses once; the result can be evaluated any number of
    /// times, from any thread.
    pub fn compile(&self, expression: &str) -> Result<CompiledCondition, CordonError> {
        let expr = self.screen(expression)?;
        log::debug!(
            "compiled condition `{}` ({} nodes)",
            expression,
            expr.size()
        );
        Ok(CompiledCondition::new(expression, expr))
    }

    /// Compares the value at `field_path` with `literal`.
    ///
    /// `field_path` must be a plain path such as `item.count` or
    /// `rows[0].status`; anything else is rejected.
    pub fn evaluate_field_condition(
        &self,
        field_path: &str,
        operator: FieldOperator,
        literal: &Value,
        context: &Context,
    ) -> Result<bool, CordonError> {
        let path = self.screen(field_path)?;
        if !is_field_path(&path) {
            log::warn!("rejected field path `{}`: not a field path", field_path);
            return Err(CordonError::rejected(field_path, RejectReason::NotAFieldPath));
        }

        let actual = Evaluator::new().eval(&path, context);
        let result = apply_binop(operator.as_binop(), &actual, literal).is_truthy();
        log::debug!("field condition `{} {}` -> {}", field_path, operator, result);
        Ok(result)
    }
}

/// An identifier followed by `.name` or `[literal]` steps.
fn is_field_path(expr: &Expr) -> bool {
    match expr {
        Expr::Identifier(_) => true,
        Expr::Member {
            object, property, ..
        } => matches!(**property, Expr::Literal(_)) && is_field_path(object),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_shape() {
        let sandbox = Sandbox::default();
        assert!(is_field_path(&sandbox.screen("a").unwrap()));
        assert!(is_field_path(&sandbox.screen("a.b[0]['c d']").unwrap()));
        assert!(!is_field_path(&sandbox.screen("a[b]").unwrap()));
        assert!(!is_field_path(&sandbox.screen("a + 1").unwrap()));
        assert!(!is_field_path(&sandbox.screen("'a'").unwrap()));
    }

    #[test]
    fn test_limits_from_config() {
        let sandbox = Sandbox::new(SandboxConfig {
            max_expression_length: 10,
            max_depth: 4,
            ..SandboxConfig::default()
        });
        assert!(sandbox.is_safe("a && b"));
        assert!(!sandbox.is_safe("a && b && c"));
        assert!(!sandbox.is_safe("((((1))))"));

        let err = sandbox.screen("aaaaaaaaaaaa").unwrap_err();
        assert_eq!(
            err,
            CordonError::Rejected {
                expression: "aaaaaaaaaaaa".to_string(),
                reason: RejectReason::TooLong { limit: 10 },
            }
        );
    }
}
