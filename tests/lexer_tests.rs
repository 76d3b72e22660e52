// tests/lexer_tests.rs

use jsonq::ast::{Operation, Token};
use jsonq::lexer::{LexError, Lexer, Position};

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut out = Vec::new();
    loop {
        let token = lexer.next_token().unwrap();
        if token == Token::Eof {
            break;
        }
        out.push(token);
    }
    out
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_body_tokens() {
    assert_eq!(
        tokens("{a, b ,c}"),
        vec![
            Token::LBrace,
            Token::Word("a".to_string()),
            Token::Comma,
            Token::Word("b".to_string()),
            Token::Comma,
            Token::Word("c".to_string()),
            Token::RBrace,
        ]
    );
}

#[test]
fn test_whitespace_is_skipped() {
    assert!(tokens("  \n\t ").is_empty());
}

#[test]
fn test_and_and() {
    let mut lexer = Lexer::new("a > 1 && b < 2");
    assert_eq!(lexer.next_token(), Ok(Token::Word("a".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(Operation::Gt)));
    assert_eq!(lexer.read_literal(), Ok("1".to_string()));
    assert_eq!(lexer.next_token(), Ok(Token::AndAnd));
    assert_eq!(lexer.next_token(), Ok(Token::Word("b".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(Operation::Lt)));
    assert_eq!(lexer.read_literal(), Ok("2".to_string()));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_peek_does_not_consume() {
    let mut lexer = Lexer::new("{x}");
    assert_eq!(lexer.peek_token(), Ok(Token::LBrace));
    assert_eq!(lexer.peek_token(), Ok(Token::LBrace));
    assert_eq!(lexer.next_token(), Ok(Token::LBrace));
    assert_eq!(lexer.next_token(), Ok(Token::Word("x".to_string())));
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_every_operator_symbol() {
    for op in Operation::ALL {
        let input = format!("key{}", op.symbol());
        let mut lexer = Lexer::new(&input);
        assert_eq!(lexer.next_token(), Ok(Token::Word("key".to_string())));
        assert_eq!(lexer.next_token(), Ok(Token::Operator(op)), "symbol {}", op);
    }
}

#[test]
fn test_operator_without_spaces() {
    let mut lexer = Lexer::new("age>=18");
    assert_eq!(lexer.next_token(), Ok(Token::Word("age".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Operator(Operation::Gte)));
    assert_eq!(lexer.read_literal(), Ok("18".to_string()));
}

#[test]
fn test_unrecognized_operator() {
    let mut lexer = Lexer::new("a =!= 1");
    lexer.next_token().unwrap();
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnrecognizedOperator {
            symbol: "=!=".to_string(),
            position: Position { offset: 2 },
        })
    );
}

#[test]
fn test_single_ampersand() {
    let mut lexer = Lexer::new("& b");
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnexpectedChar {
            ch: '&',
            position: Position { offset: 0 },
        })
    );
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_bare_literal_stops_at_paren() {
    let mut lexer = Lexer::new("3.25){}");
    assert_eq!(lexer.read_literal(), Ok("3.25".to_string()));
    assert_eq!(lexer.next_token(), Ok(Token::RParen));
}

#[test]
fn test_regex_literal_keeps_symbols() {
    let mut lexer = Lexer::new("^le.*[a-z]+$ && x");
    assert_eq!(lexer.read_literal(), Ok("^le.*[a-z]+$".to_string()));
    assert_eq!(lexer.next_token(), Ok(Token::AndAnd));
}

#[test]
fn test_quoted_literal_with_escaped_quote() {
    let mut lexer = Lexer::new(r#""say \"hi\"")"#);
    assert_eq!(lexer.read_literal(), Ok(r#""say \"hi\"""#.to_string()));
    assert_eq!(lexer.next_token(), Ok(Token::RParen));
}

#[test]
fn test_quoted_literal_keeps_spaces_and_commas() {
    let mut lexer = Lexer::new(r#""a, b c")"#);
    assert_eq!(lexer.read_literal(), Ok(r#""a, b c""#.to_string()));
}

#[test]
fn test_missing_literal_is_empty() {
    let mut lexer = Lexer::new(" )");
    assert_eq!(lexer.read_literal(), Ok(String::new()));
}

#[test]
fn test_unterminated_quoted_literal() {
    let mut lexer = Lexer::new(r#"a == "open){}"#);
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert_eq!(
        lexer.read_literal(),
        Err(LexError::UnterminatedLiteral {
            fragment: r#""open){}"#.to_string(),
            position: Position { offset: 5 },
        })
    );
}
