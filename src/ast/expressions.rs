use crate::ast::{BinOp, LogicalOp, UnaryOp};
use crate::value::Value;

/// Abstract Syntax Tree node representing a parsed expression.
///
/// The set of variants is closed. There is no call, assignment or
/// constructor node, so no parsed tree can describe running host code.
/// Every node owns its children outright; the tree is built once by the
/// parser and only ever read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    ///
    /// # Examples
    /// ```text
    /// 42
    /// "paid"
    /// true
    /// null
    /// undefined
    /// ```
    Literal(Value),

    /// Context lookup by name
    ///
    /// # Example
    /// ```text
    /// order
    /// ```
    Identifier(String),

    /// Property or index access
    ///
    /// When `computed` is false the property is always an
    /// `Expr::Literal(Value::String(_))` taken from a `.name` access.
    ///
    /// # Examples
    /// ```text
    /// order.total
    /// items[0]
    /// row["first name"]
    /// ```
    Member {
        object: Box<Expr>,
        property: Box<Expr>,
        computed: bool,
    },

    /// Arithmetic, relational or equality operation
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Short-circuiting `&&` / `||`
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Prefix `!` or `-`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Ternary conditional
    ///
    /// # Example
    /// ```text
    /// x > 0 ? "positive" : "non-positive"
    /// ```
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
}

impl Expr {
    /// Builds a non-computed member access (`object.name`).
    pub fn dot(object: Expr, name: impl Into<String>) -> Expr {
        Expr::Member {
            object: Box::new(object),
            property: Box::new(Expr::Literal(Value::String(name.into()))),
            computed: false,
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::Identifier(_) => 1,
            Expr::Member {
                object, property, ..
            } => 1 + object.size() + property.size(),
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                1 + left.size() + right.size()
            }
            Expr::Unary { operand, .. } => 1 + operand.size(),
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => 1 + test.size() + consequent.size() + alternate.size(),
        }
    }
}
