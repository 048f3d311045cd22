use crate::ast::{Span, Token, TokenKind};
use crate::error::LexError;

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_identifier_start(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
    }

    fn is_identifier_part(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if Self::is_identifier_part(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance(); // Consume backslash
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(LexError::InvalidEscape {
                                ch,
                                position: self.position,
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    /// Digits and dots are taken as one run, then parsed as a double.
    fn read_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.position;
        let mut number = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() || ch == '.' {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        number
            .parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| LexError::MalformedNumber {
                text: number,
                position: start,
            })
    }

    /// Consumes `len` characters and yields `kind`.
    fn punct(&mut self, len: usize, kind: TokenKind) -> TokenKind {
        self.position += len;
        kind
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.position;

        let kind = match self.current_char() {
            None => TokenKind::Eof,
            Some('.') => self.punct(1, TokenKind::Dot),
            Some(',') => self.punct(1, TokenKind::Comma),
            Some('+') => self.punct(1, TokenKind::Plus),
            Some('-') => self.punct(1, TokenKind::Minus),
            Some('*') => self.punct(1, TokenKind::Star),
            Some('/') => self.punct(1, TokenKind::Slash),
            Some('%') => self.punct(1, TokenKind::Percent),
            Some('?') => self.punct(1, TokenKind::Question),
            Some(':') => self.punct(1, TokenKind::Colon),
            Some('(') => self.punct(1, TokenKind::LParen),
            Some(')') => self.punct(1, TokenKind::RParen),
            Some('[') => self.punct(1, TokenKind::LBracket),
            Some(']') => self.punct(1, TokenKind::RBracket),
            Some('=') => match (self.peek_char(1), self.peek_char(2)) {
                (Some('='), Some('=')) => self.punct(3, TokenKind::EqEqEq),
                (Some('='), _) => self.punct(2, TokenKind::EqEq),
                // Assignment does not exist
                _ => return Err(LexError::UnexpectedChar { ch: '=', position: start }),
            },
            Some('!') => match (self.peek_char(1), self.peek_char(2)) {
                (Some('='), Some('=')) => self.punct(3, TokenKind::NotEqEq),
                (Some('='), _) => self.punct(2, TokenKind::NotEq),
                _ => self.punct(1, TokenKind::Bang),
            },
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.punct(2, TokenKind::GtEq)
                } else {
                    self.punct(1, TokenKind::Gt)
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.punct(2, TokenKind::LtEq)
                } else {
                    self.punct(1, TokenKind::Lt)
                }
            }
            Some('&') => {
                if self.peek_char(1) == Some('&') {
                    self.punct(2, TokenKind::AndAnd)
                } else {
                    return Err(LexError::UnexpectedChar { ch: '&', position: start });
                }
            }
            Some('|') => {
                if self.peek_char(1) == Some('|') {
                    self.punct(2, TokenKind::OrOr)
                } else {
                    return Err(LexError::UnexpectedChar { ch: '|', position: start });
                }
            }
            Some('"') => TokenKind::String(self.read_string('"')?),
            Some('\'') => TokenKind::String(self.read_string('\'')?),
            Some(ch) if Self::is_identifier_start(ch) => {
                let ident = self.read_identifier();

                match ident.as_str() {
                    "true" => TokenKind::Boolean(true),
                    "false" => TokenKind::Boolean(false),
                    "null" => TokenKind::Null,
                    "undefined" => TokenKind::Undefined,
                    _ => TokenKind::Identifier(ident),
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,
            Some(ch) => {
                return Err(LexError::UnexpectedChar {
                    ch,
                    position: self.position,
                });
            }
        };

        Ok(Token::new(kind, Span::new(start, self.position)))
    }

    /// Lexes the whole input. The result always ends with one `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Converts source text into a token stream.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(text).tokenize()?;
    log::trace!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("true false null undefined");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Boolean(true));
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Boolean(false));
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Null);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Undefined);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_condition() {
    let kinds: Vec<TokenKind> = tokenize("order.total >= 100 && !done")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier("order".to_string()),
            TokenKind::Dot,
            TokenKind::Identifier("total".to_string()),
            TokenKind::GtEq,
            TokenKind::Number(100.0),
            TokenKind::AndAnd,
            TokenKind::Bang,
            TokenKind::Identifier("done".to_string()),
            TokenKind::Eof,
        ]
    );
}
