//! Parser entry points.
//!
//! This module contains the Parser state shared by the block structurer, the
//! options that configure a parse, and the whole-source entry points. A parse
//! never stops early: recoverable problems and failed lines are reported to a
//! [`DiagnosticSink`] and parsing carries on with the next line.

use std::sync::Arc;

use tracing::debug;

use crate::{
    ast::node::Node,
    errors::errors::{DiagnosticSink, Diagnostics, Error},
    Position,
};

use super::stmt::parse_block;

/// Options for turning source text into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Spaces a leading tab expands to.
    pub tab_width: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { tab_width: 4 }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        ParseOptions::default()
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }
}

/// State for one parse: the file being parsed and where diagnostics go.
pub struct Parser<'a> {
    /// The name of the source file being parsed
    file: Arc<String>,
    /// Receives indentation warnings and failed lines
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Parser<'a> {
    pub fn new(file: Arc<String>, sink: &'a mut dyn DiagnosticSink) -> Self {
        Parser { file, sink }
    }

    /// Position of a 1-based line and column in the current file.
    pub fn position(&self, line: usize, column: usize) -> Position {
        Position::new(Arc::clone(&self.file), line as u32, column as u32)
    }

    pub fn report(&mut self, error: Error) {
        self.sink.report(error);
    }
}

/// Splits source text into lines, expanding tabs in each line's indentation.
pub fn split_lines(source: &str, tab_width: usize) -> Vec<String> {
    let tab = " ".repeat(tab_width);

    source
        .lines()
        .map(|line| {
            let content = line.trim_start_matches([' ', '\t']);
            let indentation = &line[..line.len() - content.len()];

            let mut result = indentation.replace('\t', &tab);
            result.push_str(content);
            result
        })
        .collect()
}

/// Parses a whole source file into one tree, reporting into `sink`.
///
/// The root is the file's only statement, or a `seq` of its statements.
pub fn parse(
    source: &str,
    file: &str,
    options: &ParseOptions,
    sink: &mut dyn DiagnosticSink,
) -> Node {
    let lines = split_lines(source, options.tab_width);
    debug!(file, lines = lines.len(), "parsing source");

    let mut parser = Parser::new(Arc::new(String::from(file)), sink);
    parse_block(&mut parser, &lines, 1, 0)
}

/// [`parse`] with default options, collecting the diagnostics.
pub fn parse_source(source: &str, file: &str) -> (Node, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let node = parse(source, file, &ParseOptions::default(), &mut diagnostics);

    (node, diagnostics)
}
