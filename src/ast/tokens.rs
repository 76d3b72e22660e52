use std::fmt;

use crate::ast::Operation;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Field name, filter key or query name
    ///
    /// Any run of characters that is neither whitespace, punctuation nor an
    /// operator symbol.
    ///
    /// # Examples
    /// ```text
    /// users
    /// full_name
    /// geo-city
    /// ```
    Word(String),

    /// Comparison operator of a filter clause
    ///
    /// # Examples
    /// ```text
    /// ===  ==  !==  !=  >  >=  <  <=  :  !:  ::  !::
    /// ```
    Operator(Operation),

    /// Clause separator inside a filter block
    ///
    /// # Example
    /// ```text
    /// (age > 18 && name : "leo")
    /// ```
    AndAnd,

    /// Opens a query body
    LBrace,

    /// Closes a query body
    RBrace,

    /// Opens a filter block
    LParen,

    /// Closes a filter block
    RParen,

    /// Separates the items of a body
    Comma,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "'{}'", w),
            Token::Operator(op) => write!(f, "operator '{}'", op),
            Token::AndAnd => f.write_str("'&&'"),
            Token::LBrace => f.write_str("'{'"),
            Token::RBrace => f.write_str("'}'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}
