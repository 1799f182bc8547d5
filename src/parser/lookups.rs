use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::lexer::tokens::{Token, TokenKind};

lazy_static! {
    /// Operator ranks. A lower rank binds tighter.
    pub static ref PRECEDENCE_LOOKUP: HashMap<&'static str, u8> = {
        let mut map = HashMap::new();
        map.insert("!", 0);
        map.insert("^", 1);

        // Multiplicative
        for symbol in ["*", "/", "@/", "%", "@%"] {
            map.insert(symbol, 2);
        }

        // Additive
        map.insert("+", 3);
        map.insert("-", 3);

        // Relational
        for symbol in ["<", ">", "<=", ">=", "@<", "@>", "@<=", "@>="] {
            map.insert(symbol, 4);
        }

        // Bitwise and equality
        for symbol in ["&", "|", "xor", "=="] {
            map.insert(symbol, 5);
        }

        // Logical
        map.insert("&&", 6);
        map.insert("and", 6);
        map.insert("||", 7);
        map.insert("or", 7);

        map.insert("=", 10);
        map
    };
}

/// Pairs of heads where the second statement continues the first, such as an
/// `elif` following an `if`.
const CONTINUATIONS: [(&str, &str); 6] = [
    ("if", "elif"),
    ("elif", "else"),
    ("elif", "elif"),
    ("if", "else"),
    ("init", "code"),
    ("shared", "init"),
];

/// The part a token plays in an expression.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Role {
    OpenGroup,
    CloseGroup,
    Comma,
    Colon,
    UnaryOp,
    BinaryOp,
    Atom,
}

pub fn precedence_of(symbol: &str) -> Option<u8> {
    PRECEDENCE_LOOKUP.get(symbol).copied()
}

/// Operators that take two operands: everything ranked except logical not.
pub fn is_binary_operator(symbol: &str) -> bool {
    symbol != "!" && precedence_of(symbol).is_some()
}

pub fn role_of(token: &Token) -> Role {
    match token.kind {
        TokenKind::OpenParen | TokenKind::OpenBracket => Role::OpenGroup,
        TokenKind::CloseParen | TokenKind::CloseBracket => Role::CloseGroup,
        TokenKind::Comma => Role::Comma,
        TokenKind::Colon => Role::Colon,
        TokenKind::Not => Role::UnaryOp,
        TokenKind::String | TokenKind::Number => Role::Atom,
        _ if is_binary_operator(&token.value) => Role::BinaryOp,
        _ => Role::Atom,
    }
}

pub fn continues(previous: &str, next: &str) -> bool {
    CONTINUATIONS.contains(&(previous, next))
}
