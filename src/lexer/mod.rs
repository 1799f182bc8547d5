//! Lexical analysis module for the front end.
//!
//! This module contains the line tokenizer that converts the content of one
//! source line into tokens for expression parsing. It handles:
//!
//! - Tokenization using anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position tracking for error reporting
//! - Comment markers, which end the code on a line

pub mod lexer;
pub mod tokens;
