use std::fmt::Display;

use thiserror::Error;
use tracing::{error, warn};

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Indentation problems are recovered locally, everything else costs the line.
    pub fn severity(&self) -> Severity {
        match &self.internal_error {
            ErrorImpl::IndentMismatch { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// True for the errors raised while reducing a postfix stream to a tree.
    pub fn is_reduction_failure(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::EmptyReduction
                | ErrorImpl::TooManyValues { .. }
                | ErrorImpl::MissingOperand { .. }
                | ErrorImpl::UnmatchedClose { .. }
                | ErrorImpl::InvalidCallTarget { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::IndentMismatch { .. } => "IndentMismatch",
            ErrorImpl::EmptyReduction => "EmptyReduction",
            ErrorImpl::TooManyValues { .. } => "TooManyValues",
            ErrorImpl::MissingOperand { .. } => "MissingOperand",
            ErrorImpl::UnmatchedClose { .. } => "UnmatchedClose",
            ErrorImpl::InvalidCallTarget { .. } => "InvalidCallTarget",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::IndentMismatch { expected, found } => ErrorTip::Suggestion(format!(
                "Expected an indentation of {} spaces, found {}",
                expected, found
            )),
            ErrorImpl::EmptyReduction => {
                ErrorTip::Suggestion(String::from("Line produced no expression"))
            }
            ErrorImpl::TooManyValues { leftover } => ErrorTip::Suggestion(format!(
                "Line reduced to {} values: {}, is an operator missing?",
                leftover.len(),
                leftover
                    .iter()
                    .map(|value| format!("`{}`", value))
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            ErrorImpl::MissingOperand { operator } => {
                ErrorTip::Suggestion(format!("Operator `{}` is missing an operand", operator))
            }
            ErrorImpl::UnmatchedClose { token } => {
                ErrorTip::Suggestion(format!("`{}` has no matching opening bracket", token))
            }
            ErrorImpl::InvalidCallTarget { target } => ErrorTip::Suggestion(format!(
                "Only a name can be called, found `{}`",
                target
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("indent mismatch: expected {expected:?}, found {found:?}")]
    IndentMismatch { expected: usize, found: usize },
    #[error("output blank")]
    EmptyReduction,
    #[error("too many values in output: {leftover:?}")]
    TooManyValues { leftover: Vec<String> },
    #[error("missing operand for {operator:?}")]
    MissingOperand { operator: String },
    #[error("unmatched closing token {token:?}")]
    UnmatchedClose { token: String },
    #[error("cannot call {target:?}")]
    InvalidCallTarget { target: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Receives the diagnostics produced while parsing. Reporting never stops the parse.
pub trait DiagnosticSink {
    fn report(&mut self, error: Error);
}

impl DiagnosticSink for Vec<Error> {
    fn report(&mut self, error: Error) {
        self.push(error);
    }
}

/// Collecting sink that also logs every diagnostic as it arrives.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    reported: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn all(&self) -> &[Error] {
        &self.reported
    }

    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.reported
            .iter()
            .filter(|error| error.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Error> {
        self.reported
            .iter()
            .filter(|error| error.severity() == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reported.len()
    }

    pub fn into_inner(self) -> Vec<Error> {
        self.reported
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Error) {
        let position = diagnostic.get_position();
        match diagnostic.severity() {
            Severity::Warning => warn!(
                code = diagnostic.get_error_name(),
                file = %position.file,
                line = position.line,
                column = position.column,
                "{}",
                diagnostic.get_tip()
            ),
            Severity::Error => error!(
                code = diagnostic.get_error_name(),
                file = %position.file,
                line = position.line,
                column = position.column,
                "{}",
                diagnostic.internal_error
            ),
        }
        self.reported.push(diagnostic);
    }
}
