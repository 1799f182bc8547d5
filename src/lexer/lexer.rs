use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).expect("lexer patterns are valid regexes"),
        handler,
    }
}

/// Like `MK_DEFAULT_HANDLER!`, but the marker also consumes the rest of the line.
macro_rules! MK_COMMENT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let span = lexer.span_of($value.len());
            lexer.push(MK_TOKEN!($kind, String::from($value), span));
            let rest = lexer.remainder().len();
            lexer.advance_n(rest);
        }
    };
}

lazy_static! {
    // Every pattern is anchored; the first one matching the remainder wins, so
    // longer lexemes come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("^[a-zA-Z_][a-zA-Z0-9_]*(\\.[a-zA-Z_][a-zA-Z0-9_]*)*", symbol_handler),
        pattern("^(0x[0-9a-fA-F]+|[0-9]+(\\.[0-9]+)?)", number_handler),
        pattern("^\\s+", skip_handler),
        pattern("^\"([^\"\\\\]|\\\\.)*\"", string_handler),
        pattern("^'([^'\\\\]|\\\\.)*'", string_handler),
        pattern("^//", MK_COMMENT_HANDLER!(TokenKind::DoubleSlash, "//")),
        pattern("^#", MK_COMMENT_HANDLER!(TokenKind::Hash, "#")),
        pattern("^\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern("^\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern("^@<=", MK_DEFAULT_HANDLER!(TokenKind::SignedLessEquals, "@<=")),
        pattern("^@>=", MK_DEFAULT_HANDLER!(TokenKind::SignedGreaterEquals, "@>=")),
        pattern("^@<", MK_DEFAULT_HANDLER!(TokenKind::SignedLess, "@<")),
        pattern("^@>", MK_DEFAULT_HANDLER!(TokenKind::SignedGreater, "@>")),
        pattern("^@/", MK_DEFAULT_HANDLER!(TokenKind::SignedSlash, "@/")),
        pattern("^@%", MK_DEFAULT_HANDLER!(TokenKind::SignedPercent, "@%")),
        pattern("^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern("^\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern("^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern("^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern("^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("^\\^", MK_DEFAULT_HANDLER!(TokenKind::Caret, "^")),
        pattern("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
        pattern("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("^&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
        pattern("^\\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    origin: Position,
}

impl Lexer {
    /// `origin` is the position of the first character of `source`.
    pub fn new(source: String, origin: Position) -> Lexer {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            origin,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Position of a byte offset into the source. Columns count characters.
    pub fn position_at(&self, offset: usize) -> Position {
        self.origin.offset(self.source[..offset].chars().count())
    }

    /// Span of the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position_at(self.pos),
            end: self.position_at(self.pos + len),
        }
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|matched| matched.as_str().to_string())
            .unwrap_or_default()
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
}

// Literals keep their quotes and escapes; decoding belongs to code generation.
fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::String, matched, span));
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = lexer.matched(regex);
    let span = lexer.span_of(value.len());
    lexer.advance_n(value.len());

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);
    lexer.push(MK_TOKEN!(kind, value, span));
}

/// Tokenizes the content of one line. `origin` is where `source` starts, which
/// is past the line's indentation.
pub fn tokenize_line(source: &str, origin: Position) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source.to_string(), origin);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex);
                matched = true;
                break;
            }
        }

        if !matched {
            let token = lex.at().map(String::from).unwrap_or_default();
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken { token },
                lex.position_at(lex.pos),
            ));
        }
    }

    Ok(lex.tokens)
}
