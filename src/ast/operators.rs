/// Binary operators that always evaluate both operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Equality
    /// Coercive equal (`==`)
    LooseEqual,
    /// Coercive not equal (`!=`)
    LooseNotEqual,
    /// Strict equal (`===`)
    StrictEqual,
    /// Strict not equal (`!==`)
    StrictNotEqual,

    // Relational
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Arithmetic
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Remainder (`%`)
    Modulo,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::LooseEqual => "==",
            BinOp::LooseNotEqual => "!=",
            BinOp::StrictEqual => "===",
            BinOp::StrictNotEqual => "!==",
            BinOp::LessThan => "<",
            BinOp::GreaterThan => ">",
            BinOp::LessEqual => "<=",
            BinOp::GreaterEqual => ">=",
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Modulo => "%",
        }
    }
}

/// Short-circuiting operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// `&&`
    And,
    /// `||`
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Boolean negation (`!`)
    Not,
    /// Arithmetic negation (`-`)
    Negate,
}
