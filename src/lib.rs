#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Arc};

use crate::errors::errors::{Error, ErrorTip, Severity};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

pub use ast::node::Node;
pub use parser::parser::{parse, parse_source, ParseOptions};

/// A location in a source file. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub file: Arc<String>,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: Arc<String>, line: u32, column: u32) -> Self {
        Position { file, line, column }
    }

    pub fn null() -> Self {
        Position::new(Arc::new(String::from("<null>")), 0, 0)
    }

    /// Same line, `columns` further to the right.
    pub fn offset(&self, columns: usize) -> Self {
        Position {
            file: Arc::clone(&self.file),
            line: self.line,
            column: self.column + columns as u32,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Returns the text of a 1-based line of `source`, without its line terminator.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth(line as usize - 1)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}

/// Renders an error against the source it was reported for.
///
/// ```text
/// Error: TooManyValues (Line reduced to 2 values: `a`, `b`, is an operator missing?)
/// -> main.se:3:1
///   |
/// 3 | a b
///   | ^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let label = match error.severity() {
        Severity::Warning => "Warning",
        Severity::Error => "Error",
    };

    let mut result = String::new();
    if let ErrorTip::None = error.get_tip() {
        result.push_str(&format!("{}: {}\n", label, error.get_error_name()));
    } else {
        result.push_str(&format!(
            "{}: {} ({})\n",
            label,
            error.get_error_name(),
            error.get_tip()
        ));
    }
    result.push_str(&format!("-> {}\n", position));

    let Some(line_text) = get_line(source, position.line) else {
        return result;
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    result.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    result.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let line_pos = (position.column as usize).saturating_sub(1);
    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    result.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    result
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (&string[start..], start)
}
