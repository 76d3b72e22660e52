use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Filter, Query, Token},
    lexer::{LexError, Lexer, Position},
};

/// Errors raised while compiling a query string. Each names the fragment of
/// the query it trips over.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unterminated '{{' in '{fragment}'")]
    UnterminatedBrace { fragment: String },

    #[error("unterminated '(' in '{fragment}'")]
    UnterminatedFilter { fragment: String },

    #[error("query '{fragment}' has no '{{...}}' body")]
    MissingBody { fragment: String },

    #[error("empty filter clause at {position}")]
    EmptyFilter { position: Position },

    #[error("filter clause '{fragment}' is missing its key")]
    MissingKey { fragment: String },

    #[error("filter clause on '{key}' is missing its operator")]
    MissingOperator { key: String },

    #[error("filter clause '{key} {op}' is missing its literal")]
    MissingLiteral { key: String, op: String },

    #[error("nested query at {position} has no field name")]
    MissingName { position: Position },

    #[error("empty field at {position}")]
    EmptyField { position: Position },

    #[error("field '{name}' is queried twice")]
    DuplicateField { name: String },

    #[error("expected {expected}, found {found} at {position}")]
    UnexpectedToken {
        expected: &'static str,
        found: Token,
        position: Position,
    },

    #[error("unexpected trailing input '{fragment}'")]
    TrailingInput { fragment: String },
}

/// Retrieved fields and nested queries of one body.
type Body = (Vec<String>, Vec<(String, Query)>);

/// Recursive-descent parser for the query grammar.
///
/// ```text
/// query       := name? filterblock? '{' body '}'
/// filterblock := '(' clause ('&&' clause)* ')'
/// clause      := key operator literal
/// body        := item (',' item)*
/// item        := field | query
/// ```
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser { lexer }
    }

    fn offset(&self) -> usize {
        self.lexer.position().offset
    }

    fn peek(&mut self) -> Result<Token, ParseError> {
        Ok(self.lexer.peek_token()?)
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        Ok(self.lexer.next_token()?)
    }

    /// Parses a whole query string. The optional top-level name is accepted
    /// and discarded.
    pub fn parse(&mut self) -> Result<Query, ParseError> {
        let start = self.offset();
        let name = match self.peek()? {
            Token::Word(name) => {
                self.advance()?;
                Some(name)
            }
            _ => None,
        };

        let query = self.parse_query(start)?;

        let tail = self.offset();
        if self.advance()? != Token::Eof {
            return Err(ParseError::TrailingInput {
                fragment: self.lexer.rest_from(tail).trim().to_string(),
            });
        }

        debug!(
            name = name.as_deref().unwrap_or(""),
            filters = query.keep_filters(),
            fields = query.retrieve().len(),
            nested = query.next().len(),
            "compiled query"
        );
        Ok(query)
    }

    /// Parses `filterblock? '{' body '}'`; the name, if any, is already
    /// consumed. `start` is where the query began in the source.
    fn parse_query(&mut self, start: usize) -> Result<Query, ParseError> {
        let filters = if self.peek()? == Token::LParen {
            self.advance()?;
            self.parse_filters(start)?
        } else {
            Vec::new()
        };

        match self.advance()? {
            Token::LBrace => {}
            Token::Eof | Token::Comma | Token::RBrace => {
                return Err(ParseError::MissingBody {
                    fragment: self.lexer.fragment(start, self.offset()).trim().to_string(),
                });
            }
            found => {
                return Err(ParseError::UnexpectedToken {
                    expected: "'{'",
                    found,
                    position: self.lexer.position(),
                });
            }
        }

        let (retrieve, next) = self.parse_body(start)?;
        Ok(Query::new(filters, retrieve, next))
    }

    /// Parses clauses up to and including the closing ')'.
    fn parse_filters(&mut self, start: usize) -> Result<Vec<Filter>, ParseError> {
        if self.peek()? == Token::RParen {
            return Err(ParseError::EmptyFilter {
                position: self.lexer.position(),
            });
        }

        let mut filters = Vec::new();
        loop {
            filters.push(self.parse_clause(start)?);

            match self.advance()? {
                Token::AndAnd => continue,
                Token::RParen => return Ok(filters),
                Token::Eof => {
                    return Err(ParseError::UnterminatedFilter {
                        fragment: self.lexer.rest_from(start),
                    });
                }
                found => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "'&&' or ')'",
                        found,
                        position: self.lexer.position(),
                    });
                }
            }
        }
    }

    /// Parses `key operator literal`.
    fn parse_clause(&mut self, start: usize) -> Result<Filter, ParseError> {
        let clause_start = self.offset();
        let key = match self.advance()? {
            Token::Word(key) => key,
            Token::RParen | Token::AndAnd => {
                return Err(ParseError::EmptyFilter {
                    position: Position {
                        offset: clause_start,
                    },
                });
            }
            Token::Eof => {
                return Err(ParseError::UnterminatedFilter {
                    fragment: self.lexer.rest_from(start),
                });
            }
            _ => {
                return Err(ParseError::MissingKey {
                    fragment: self.lexer.fragment(clause_start, self.offset()).trim().to_string(),
                });
            }
        };

        let op = match self.advance()? {
            Token::Operator(op) => op,
            _ => return Err(ParseError::MissingOperator { key }),
        };

        let raw = self.lexer.read_literal()?;
        if raw.is_empty() {
            return Err(ParseError::MissingLiteral {
                key,
                op: op.to_string(),
            });
        }

        Ok(Filter::new(key, op, raw))
    }

    /// Parses items up to and including the closing '}'.
    fn parse_body(&mut self, start: usize) -> Result<Body, ParseError> {
        let mut retrieve = Vec::new();
        let mut next: Vec<(String, Query)> = Vec::new();

        if self.peek()? == Token::RBrace {
            self.advance()?;
            return Ok((retrieve, next));
        }

        loop {
            let item_start = self.offset();
            let name = match self.advance()? {
                Token::Word(name) => name,
                Token::Comma | Token::RBrace => {
                    return Err(ParseError::EmptyField {
                        position: Position { offset: item_start },
                    });
                }
                Token::LBrace | Token::LParen => {
                    return Err(ParseError::MissingName {
                        position: Position { offset: item_start },
                    });
                }
                Token::Eof => {
                    return Err(ParseError::UnterminatedBrace {
                        fragment: self.lexer.rest_from(start),
                    });
                }
                found => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "a field name",
                        found,
                        position: self.lexer.position(),
                    });
                }
            };

            if retrieve.contains(&name) || next.iter().any(|(n, _)| *n == name) {
                return Err(ParseError::DuplicateField { name });
            }

            match self.peek()? {
                Token::LParen | Token::LBrace => {
                    let sub = self.parse_query(item_start)?;
                    next.push((name, sub));
                }
                _ => retrieve.push(name),
            }

            match self.advance()? {
                Token::Comma => continue,
                Token::RBrace => return Ok((retrieve, next)),
                Token::Eof => {
                    return Err(ParseError::UnterminatedBrace {
                        fragment: self.lexer.rest_from(start),
                    });
                }
                found => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "',' or '}'",
                        found,
                        position: self.lexer.position(),
                    });
                }
            }
        }
    }
}

/// Compiles a query string into a reusable [`Query`] tree.
///
/// ```
/// use jsonq::{compile, Literal, Operation};
///
/// let query = compile("(a>1){}").unwrap();
/// let filter = &query.filters()[0];
/// assert_eq!(filter.key(), "a");
/// assert_eq!(filter.op(), Operation::Gt);
/// assert_eq!(filter.literal(), &Literal::Int(1));
/// ```
pub fn compile(source: &str) -> Result<Query, ParseError> {
    Query::compile(source)
}
