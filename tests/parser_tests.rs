// tests/parser_tests.rs

use cordon_lang::ast::{BinOp, Expr, LogicalOp, UnaryOp};
use cordon_lang::error::ParseError;
use cordon_lang::lexer::tokenize;
use cordon_lang::parser::{Parser, parse};
use cordon_lang::Value;

fn parse_str(input: &str) -> Result<Expr, ParseError> {
    parse(tokenize(input)?)
}

fn num(n: f64) -> Expr {
    Expr::Literal(Value::Number(n))
}

fn ident(name: &str) -> Expr {
    Expr::Identifier(name.to_string())
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_comparison() {
    let expr = parse_str("price > 100").unwrap();

    assert!(matches!(
        expr,
        Expr::Binary {
            op: BinOp::GreaterThan,
            ..
        }
    ));
}

#[test]
fn test_parentheses() {
    // Should be: Multiply(Add(1, 2), 3)
    assert_eq!(
        parse_str("(1 + 2) * 3").unwrap(),
        binary(BinOp::Multiply, binary(BinOp::Add, num(1.0), num(2.0)), num(3.0))
    );
}

#[test]
fn test_arithmetic() {
    // Should be: Add(1, Multiply(2, 3))
    assert_eq!(
        parse_str("1 + 2 * 3").unwrap(),
        binary(BinOp::Add, num(1.0), binary(BinOp::Multiply, num(2.0), num(3.0)))
    );
}

#[test]
fn test_left_associativity() {
    // Should be: Subtract(Subtract(10, 4), 3)
    assert_eq!(
        parse_str("10 - 4 - 3").unwrap(),
        binary(BinOp::Subtract, binary(BinOp::Subtract, num(10.0), num(4.0)), num(3.0))
    );

    // Equality chains left to right as well
    assert_eq!(
        parse_str("a == b != c").unwrap(),
        binary(
            BinOp::LooseNotEqual,
            binary(BinOp::LooseEqual, ident("a"), ident("b")),
            ident("c")
        )
    );
}

#[test]
fn test_relational_binds_tighter_than_equality() {
    assert_eq!(
        parse_str("a < b === true").unwrap(),
        binary(
            BinOp::StrictEqual,
            binary(BinOp::LessThan, ident("a"), ident("b")),
            Expr::Literal(Value::Boolean(true))
        )
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    let expr = parse_str("a || b && c").unwrap();
    match expr {
        Expr::Logical {
            op: LogicalOp::Or,
            left,
            right,
        } => {
            assert_eq!(*left, ident("a"));
            assert!(matches!(
                *right,
                Expr::Logical {
                    op: LogicalOp::And,
                    ..
                }
            ));
        }
        _ => panic!("Expected OR at the root"),
    }
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    assert_eq!(
        parse_str("-a * b").unwrap(),
        binary(
            BinOp::Multiply,
            Expr::Unary {
                op: UnaryOp::Negate,
                operand: Box::new(ident("a")),
            },
            ident("b")
        )
    );

    // `!` applies to the member chain, not just the head
    assert_eq!(
        parse_str("!a.b").unwrap(),
        Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(Expr::dot(ident("a"), "b")),
        }
    );
}

// ============================================================================
// Ternary
// ============================================================================

#[test]
fn test_ternary_lowest_precedence() {
    match parse_str("a || b ? 1 + 1 : 2").unwrap() {
        Expr::Conditional {
            test,
            consequent,
            alternate,
        } => {
            assert!(matches!(*test, Expr::Logical { op: LogicalOp::Or, .. }));
            assert_eq!(*consequent, binary(BinOp::Add, num(1.0), num(1.0)));
            assert_eq!(*alternate, num(2.0));
        }
        other => panic!("Expected conditional, got {:?}", other),
    }
}

#[test]
fn test_ternary_right_associative() {
    // a ? 1 : b ? 2 : 3  ==  a ? 1 : (b ? 2 : 3)
    match parse_str("a ? 1 : b ? 2 : 3").unwrap() {
        Expr::Conditional { alternate, .. } => {
            assert!(matches!(*alternate, Expr::Conditional { .. }));
        }
        other => panic!("Expected conditional, got {:?}", other),
    }

    // Nested in the consequent too
    match parse_str("a ? b ? 1 : 2 : 3").unwrap() {
        Expr::Conditional {
            consequent,
            alternate,
            ..
        } => {
            assert!(matches!(*consequent, Expr::Conditional { .. }));
            assert_eq!(*alternate, num(3.0));
        }
        other => panic!("Expected conditional, got {:?}", other),
    }
}

#[test]
fn test_ternary_missing_colon() {
    assert_eq!(parse_str("a ? 1"), Err(ParseError::UnexpectedEof));
    assert!(matches!(
        parse_str("a ? 1 ) 2"),
        Err(ParseError::Expected { .. })
    ));
}

// ============================================================================
// Member Access
// ============================================================================

#[test]
fn test_dot_access_uses_literal_property() {
    match parse_str("order.total").unwrap() {
        Expr::Member {
            object,
            property,
            computed,
        } => {
            assert_eq!(*object, ident("order"));
            assert_eq!(*property, Expr::Literal(Value::String("total".to_string())));
            assert!(!computed);
        }
        other => panic!("Expected member access, got {:?}", other),
    }
}

#[test]
fn test_computed_access() {
    match parse_str("rows[i + 1]").unwrap() {
        Expr::Member {
            property, computed, ..
        } => {
            assert!(computed);
            assert_eq!(*property, binary(BinOp::Add, ident("i"), num(1.0)));
        }
        other => panic!("Expected member access, got {:?}", other),
    }
}

#[test]
fn test_member_chain_left_associative() {
    let expected = Expr::Member {
        object: Box::new(Expr::dot(ident("a"), "b")),
        property: Box::new(num(0.0)),
        computed: true,
    };
    let expected = Expr::dot(expected, "c");
    assert_eq!(parse_str("a.b[0].c").unwrap(), expected);
}

#[test]
fn test_keyword_property_names() {
    assert_eq!(parse_str("row.null").unwrap(), Expr::dot(ident("row"), "null"));
    assert_eq!(parse_str("row.true").unwrap(), Expr::dot(ident("row"), "true"));
}

#[test]
fn test_dot_requires_name() {
    assert!(matches!(parse_str("a.1"), Err(ParseError::Expected { .. })));
    assert!(matches!(parse_str("a.'b'"), Err(ParseError::Expected { .. })));
    assert_eq!(parse_str("a."), Err(ParseError::UnexpectedEof));
}

// ============================================================================
// Literals and Grouping
// ============================================================================

#[test]
fn test_deep_parentheses() {
    assert_eq!(parse_str("(((1)))").unwrap(), num(1.0));
}

#[test]
fn test_literals() {
    assert_eq!(parse_str("null").unwrap(), Expr::Literal(Value::Null));
    assert_eq!(parse_str("undefined").unwrap(), Expr::Literal(Value::Undefined));
    assert_eq!(
        parse_str("'x'").unwrap(),
        Expr::Literal(Value::String("x".to_string()))
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_trailing_tokens() {
    assert!(matches!(
        parse_str("a b"),
        Err(ParseError::TrailingInput { .. })
    ));
    assert!(matches!(
        parse_str("(1))"),
        Err(ParseError::TrailingInput { .. })
    ));
}

#[test]
fn test_unbalanced() {
    assert_eq!(parse_str("(1 + 2"), Err(ParseError::UnexpectedEof));
    assert_eq!(parse_str("a[0"), Err(ParseError::UnexpectedEof));
    assert!(matches!(parse_str("]"), Err(ParseError::UnexpectedToken { .. })));
}

#[test]
fn test_no_call_syntax() {
    // `f(x)` is an identifier followed by a parenthesised group: trailing input
    assert!(matches!(
        parse_str("f(x)"),
        Err(ParseError::TrailingInput { .. })
    ));
    assert!(matches!(
        parse_str("a.b()"),
        Err(ParseError::TrailingInput { .. })
    ));
    assert!(parse_str("a, b").is_err());
}

#[test]
fn test_empty_input() {
    assert_eq!(parse_str(""), Err(ParseError::UnexpectedEof));
}

#[test]
fn test_lex_errors_pass_through() {
    assert!(matches!(parse_str("a = 1"), Err(ParseError::Lex(_))));
}

#[test]
fn test_nesting_limit() {
    let tokens = tokenize("[[[[x]]]]").unwrap();
    // `[` needs an object, so this fails on the first token regardless of depth
    assert!(Parser::with_max_depth(tokens, 2).parse().is_err());

    let tokens = tokenize("a[b[c[d[e]]]]").unwrap();
    assert_eq!(
        Parser::with_max_depth(tokens, 3).parse(),
        Err(ParseError::TooDeep { limit: 3 })
    );

    let tokens = tokenize("a[b[c[d[e]]]]").unwrap();
    assert!(Parser::with_max_depth(tokens, 8).parse().is_ok());
}
