use std::fmt;

use thiserror::Error;

use crate::ast::{Operation, Token};

/// Character offset into the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {}", self.offset)
    }
}

/// Errors raised while splitting a query string into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: Position },

    #[error("unrecognized operator '{symbol}' at {position}")]
    UnrecognizedOperator { symbol: String, position: Position },

    #[error("unterminated quoted literal '{fragment}' starting at {position}")]
    UnterminatedLiteral { fragment: String, position: Position },
}

/// Tokenizer for the query language.
///
/// Structure (braces, parens, commas, `&&`, words and operators) is read with
/// [`Lexer::next_token`]. Literals have a looser character set and are only
/// valid right after an operator, so the parser asks for them explicitly with
/// [`Lexer::read_literal`].
#[derive(Debug, Clone)]
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

    pub fn position(&self) -> Position {
        Position {
            offset: self.position,
        }
    }

    /// Source text between two offsets, clamped to the input.
    pub fn fragment(&self, start: usize, end: usize) -> String {
        let end = end.min(self.input.len());
        let start = start.min(end);
        self.input[start..end].iter().collect()
    }

    /// Source text from `start` to the end of input.
    pub fn rest_from(&self, start: usize) -> String {
        self.fragment(start, self.input.len())
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

    fn is_word_char(ch: char) -> bool {
        !ch.is_whitespace()
            && !Operation::is_symbol_char(ch)
            && !matches!(ch, '{' | '}' | '(' | ')' | ',' | '&' | '"')
    }

    fn is_literal_char(ch: char) -> bool {
        !ch.is_whitespace() && !matches!(ch, '{' | '}' | '(' | ')' | '&' | '"')
    }

    fn read_while(&mut self, accept: fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if accept(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_operator(&mut self) -> Result<Token, LexError> {
        let start = self.position();
        let symbol = self.read_while(Operation::is_symbol_char);
        Operation::from_symbol(&symbol)
            .map(Token::Operator)
            .ok_or(LexError::UnrecognizedOperator {
                symbol,
                position: start,
            })
    }

    /// Reads a double-quoted literal, quotes included. A backslash keeps the
    /// following character from closing the literal.
    fn read_quoted(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::from('"');
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            result.push(ch);
            self.advance();
            match ch {
                '"' => return Ok(result),
                '\\' => {
                    if let Some(escaped) = self.current_char() {
                        result.push(escaped);
                        self.advance();
                    }
                }
                _ => {}
            }
        }

        Err(LexError::UnterminatedLiteral {
            fragment: self.rest_from(start),
            position: Position { offset: start },
        })
    }

    /// Reads the literal of a filter clause: either a double-quoted token or
    /// a bare run of characters. Returns an empty string when no literal is
    /// present.
    pub fn read_literal(&mut self) -> Result<String, LexError> {
        self.skip_whitespace();
        match self.current_char() {
            Some('"') => self.read_quoted(),
            _ => Ok(self.read_while(Self::is_literal_char)),
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<Token, LexError> {
        let saved = self.position;
        let token = self.next_token();
        self.position = saved;
        token
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('{') => {
                self.advance();
                Ok(Token::LBrace)
            }
            Some('}') => {
                self.advance();
                Ok(Token::RBrace)
            }
            Some('(') => {
                self.advance();
                Ok(Token::LParen)
            }
            Some(')') => {
                self.advance();
                Ok(Token::RParen)
            }
            Some(',') => {
                self.advance();
                Ok(Token::Comma)
            }
            Some('&') => {
                if self.peek_char(1) == Some('&') {
                    self.advance();
                    self.advance();
                    Ok(Token::AndAnd)
                } else {
                    Err(LexError::UnexpectedChar {
                        ch: '&',
                        position: self.position(),
                    })
                }
            }
            Some(ch) if Operation::is_symbol_char(ch) => self.read_operator(),
            Some(ch) if Self::is_word_char(ch) => Ok(Token::Word(self.read_while(Self::is_word_char))),
            Some(ch) => Err(LexError::UnexpectedChar {
                ch,
                position: self.position(),
            }),
        }
    }
}

#[test]
fn test_structure() {
    let mut lexer = Lexer::new("users(age >= 18){name, geo{city}}");
    assert_eq!(lexer.next_token(), Ok(Token::Word("users".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::LParen));
    assert_eq!(lexer.next_token(), Ok(Token::Word("age".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(Operation::Gte)));
    assert_eq!(lexer.read_literal(), Ok("18".to_string()));
    assert_eq!(lexer.next_token(), Ok(Token::RParen));
    assert_eq!(lexer.next_token(), Ok(Token::LBrace));
    assert_eq!(lexer.next_token(), Ok(Token::Word("name".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Comma));
    assert_eq!(lexer.next_token(), Ok(Token::Word("geo".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::LBrace));
    assert_eq!(lexer.next_token(), Ok(Token::Word("city".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::RBrace));
    assert_eq!(lexer.next_token(), Ok(Token::RBrace));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_quoted_literal_keeps_quotes() {
    let mut lexer = Lexer::new(r#"name == "Leonid B" && x"#);
    assert_eq!(lexer.next_token(), Ok(Token::Word("name".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(Operation::LooseEq)));
    assert_eq!(lexer.read_literal(), Ok("\"Leonid B\"".to_string()));
    assert_eq!(lexer.next_token(), Ok(Token::AndAnd));
}
