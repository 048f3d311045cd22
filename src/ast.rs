//! # Cordon Expression Language - Abstract Syntax Tree
//!
//! This module defines the tokens and syntax tree for Cordon, a small,
//! expression-only language for writing conditions over a data context.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer, with source spans
//! - **[expressions]** - Expression nodes (literals, lookups, member access, operations)
//! - **[operators]** - Binary, logical and unary operators
//!
//! ## Quick Start
//!
//! ```text
//! order.total > 100 && order.status === "paid"
//! ```
//!
//! ## Precedence
//!
//! Lowest to highest:
//!
//! | Level | Operators                  | Associativity |
//! |-------|----------------------------|---------------|
//! | 1     | `? :`                      | right         |
//! | 2     | `\|\|`                     | left          |
//! | 3     | `&&`                       | left          |
//! | 4     | `==` `!=` `===` `!==`      | left          |
//! | 5     | `<` `<=` `>` `>=`          | left          |
//! | 6     | `+` `-`                    | left          |
//! | 7     | `*` `/` `%`                | left          |
//! | 8     | `!` unary `-`              | prefix        |
//! | 9     | `.name` `[expr]`           | left          |
//!
//! ## What is not in the language
//!
//! Calls, assignment, object/array literals, statements and declarations.
//! The grammar has no production that could produce any of them.
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Expr;
pub use operators::{BinOp, LogicalOp, UnaryOp};
pub use tokens::{Span, Token, TokenKind};
