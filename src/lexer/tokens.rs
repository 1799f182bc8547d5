use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("elif", TokenKind::Elif);
        map.insert("else", TokenKind::Else);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("xor", TokenKind::Xor);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    Comma,
    Colon,

    // Comment markers, the lexer swallows the rest of the line after them
    Hash,
    DoubleSlash,

    Not,        // !
    Caret,      // ^
    Star,       // *
    Slash,      // /
    SignedSlash, // @/
    Percent,    // %
    SignedPercent, // @%
    Plus,
    Dash,

    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    SignedLess,
    SignedLessEquals,
    SignedGreater,
    SignedGreaterEquals,

    Ampersand,  // &
    Pipe,       // |
    Equals,     // ==
    And,        // && and
    Or,         // || or
    Xor,
    Assignment, // =

    // Reserved
    If,
    Elif,
    Else,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// `#` or `//`: the token and everything after it is not code.
    pub fn is_comment_marker(&self) -> bool {
        self.is_one_of_many(&[TokenKind::Hash, TokenKind::DoubleSlash])
    }

    /// `if` and `elif` open a block whose first child is their condition.
    pub fn is_bodied(&self) -> bool {
        self.is_one_of_many(&[TokenKind::If, TokenKind::Elif])
    }
}
