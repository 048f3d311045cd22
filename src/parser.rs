use std::mem;

use crate::{
    ast::{BinOp, Expr, LogicalOp, Span, Token, TokenKind, UnaryOp},
    config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_HEIGHT, SandboxConfig},
    error::ParseError,
    lexer,
    value::Value,
};

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
    max_depth: usize,
    /// Height of the expression built most recently
    height: usize,
    max_height: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_DEPTH)
    }

    /// A parser that refuses input nested deeper than `max_depth`.
    pub fn with_max_depth(mut tokens: Vec<Token>, max_depth: usize) -> Self {
        if tokens.last().map(|t| &t.kind) != Some(&TokenKind::Eof) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
        }
        Parser {
            tokens,
            position: 0,
            depth: 0,
            max_depth,
            height: 0,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }

    /// Caps the height of the finished tree. Chains such as `a.b.c` or
    /// `x + y + z` are parsed in a loop but still nest one level per link.
    pub fn with_max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height;
        self
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Takes the current token out of the stream and moves past it.
    fn bump(&mut self) -> Token {
        let span = self.current().span;
        let token = mem::replace(
            &mut self.tokens[self.position],
            Token::new(TokenKind::Eof, span),
        );
        self.advance();
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(&self.current().kind) == mem::discriminant(kind)
    }

    fn expect(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.error_expected(&expected.to_string()));
        }
        self.advance();
        Ok(())
    }

    fn error_expected(&self, expected: &str) -> ParseError {
        let token = self.current();
        match token.kind {
            TokenKind::Eof => ParseError::UnexpectedEof,
            ref kind => ParseError::Expected {
                expected: expected.to_string(),
                found: kind.to_string(),
                span: token.span,
            },
        }
    }

    fn error_unexpected(&self) -> ParseError {
        let token = self.current();
        match token.kind {
            TokenKind::Eof => ParseError::UnexpectedEof,
            ref kind => ParseError::UnexpectedToken {
                found: kind.to_string(),
                span: token.span,
            },
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    /// Records the height of the node just built.
    fn built(&mut self, height: usize) -> Result<(), ParseError> {
        if height > self.max_height {
            return Err(ParseError::TooTall {
                limit: self.max_height,
            });
        }
        self.height = height;
        Ok(())
    }

    /// Parse primary expressions (atoms): literals, identifiers, '(' expr ')'
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let expr = match &self.current().kind {
            TokenKind::Number(_)
            | TokenKind::String(_)
            | TokenKind::Boolean(_)
            | TokenKind::Null
            | TokenKind::Undefined
            | TokenKind::Identifier(_) => {
                let leaf = match self.bump().kind {
                    TokenKind::Number(n) => Expr::Literal(Value::Number(n)),
                    TokenKind::String(s) => Expr::Literal(Value::String(s)),
                    TokenKind::Boolean(b) => Expr::Literal(Value::Boolean(b)),
                    TokenKind::Null => Expr::Literal(Value::Null),
                    TokenKind::Undefined => Expr::Literal(Value::Undefined),
                    TokenKind::Identifier(name) => Expr::Identifier(name),
                    _ => unreachable!(),
                };
                self.built(1)?;
                leaf
            }
            TokenKind::LParen => {
                // the inner expression has already recorded its height
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                expr
            }
            _ => return Err(self.error_unexpected()),
        };
        Ok(expr)
    }

    /// Name after `.`; keywords are fine as property names (`row.null`).
    fn parse_property_name(&mut self) -> Result<String, ParseError> {
        let name = match &self.current().kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Boolean(b) => b.to_string(),
            TokenKind::Null => "null".to_string(),
            TokenKind::Undefined => "undefined".to_string(),
            _ => return Err(self.error_expected("property name after '.'")),
        };
        self.advance();
        Ok(name)
    }

    /// Parse member access chains: `a.b`, `a[expr]`, `a.b[0].c`
    fn parse_member(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        let mut height = self.height;

        loop {
            if self.check(&TokenKind::Dot) {
                self.advance(); // consume '.'
                let name = self.parse_property_name()?;
                height += 1;
                self.built(height)?;
                expr = Expr::dot(expr, name);
            } else if self.check(&TokenKind::LBracket) {
                self.advance(); // consume '['
                let property = self.parse_expression()?;
                self.expect(TokenKind::RBracket)?;
                height = height.max(self.height) + 1;
                self.built(height)?;

                expr = Expr::Member {
                    object: Box::new(expr),
                    property: Box::new(property),
                    computed: true,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match &self.current().kind {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Negate,
            _ => return self.parse_member(),
        };
        self.advance();

        self.descend()?;
        let operand = self.parse_unary()?;
        self.ascend();
        self.built(self.height + 1)?;

        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// One left-associative binary precedence level.
    fn parse_binary_level(
        &mut self,
        next: fn(&mut Self) -> Result<Expr, ParseError>,
        operator: fn(&TokenKind) -> Option<BinOp>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;
        let mut height = self.height;

        while let Some(op) = operator(&self.current().kind) {
            self.advance();
            let right = next(self)?;
            height = height.max(self.height) + 1;
            self.built(height)?;

            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_unary, |kind| match kind {
            TokenKind::Star => Some(BinOp::Multiply),
            TokenKind::Slash => Some(BinOp::Divide),
            TokenKind::Percent => Some(BinOp::Modulo),
            _ => None,
        })
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Subtract),
            _ => None,
        })
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_additive, |kind| match kind {
            TokenKind::Lt => Some(BinOp::LessThan),
            TokenKind::Gt => Some(BinOp::GreaterThan),
            TokenKind::LtEq => Some(BinOp::LessEqual),
            TokenKind::GtEq => Some(BinOp::GreaterEqual),
            _ => None,
        })
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_relational, |kind| match kind {
            TokenKind::EqEq => Some(BinOp::LooseEqual),
            TokenKind::NotEq => Some(BinOp::LooseNotEqual),
            TokenKind::EqEqEq => Some(BinOp::StrictEqual),
            TokenKind::NotEqEq => Some(BinOp::StrictNotEqual),
            _ => None,
        })
    }

    fn parse_logical(
        &mut self,
        next: fn(&mut Self) -> Result<Expr, ParseError>,
        token: TokenKind,
        op: LogicalOp,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;
        let mut height = self.height;

        while self.check(&token) {
            self.advance();
            let right = next(self)?;
            height = height.max(self.height) + 1;
            self.built(height)?;

            left = Expr::Logical {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical(Self::parse_equality, TokenKind::AndAnd, LogicalOp::And)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical(Self::parse_and, TokenKind::OrOr, LogicalOp::Or)
    }

    /// `test ? consequent : alternate`, right-associative.
    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let test = self.parse_or()?;
        let mut height = self.height;

        if !self.check(&TokenKind::Question) {
            return Ok(test);
        }
        self.advance(); // consume '?'

        let consequent = self.parse_expression()?;
        height = height.max(self.height);
        self.expect(TokenKind::Colon)?;
        let alternate = self.parse_expression()?;
        self.built(height.max(self.height) + 1)?;

        Ok(Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.descend()?;
        let expr = self.parse_conditional()?;
        self.ascend();
        Ok(expr)
    }

    /// Parses one expression and requires the whole stream to be consumed.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;

        let token = self.current();
        if token.kind != TokenKind::Eof {
            return Err(ParseError::TrailingInput {
                found: token.kind.to_string(),
                span: token.span,
            });
        }
        Ok(expr)
    }
}

/// Parses a complete token stream into a single expression.
pub fn parse(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}

/// Lexes and parses `text` under the depth and height limits in `limits`.
pub fn parse_source(text: &str, limits: &SandboxConfig) -> Result<Expr, ParseError> {
    let tokens = lexer::tokenize(text)?;
    Parser::with_max_depth(tokens, limits.max_depth)
        .with_max_height(limits.max_height)
        .parse()
}
