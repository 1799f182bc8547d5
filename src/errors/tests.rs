//! Unit tests for error handling.
//!
//! This module contains tests for error types, severities and the
//! collecting diagnostic sink.

use crate::errors::errors::{DiagnosticSink, Diagnostics, Error, ErrorImpl, ErrorTip, Severity};
use crate::Position;
use std::sync::Arc;

fn position(line: u32) -> Position {
    Position::new(Arc::new("test.se".to_string()), line, 1)
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().line, 10);
}

#[test]
fn test_indent_mismatch_is_a_warning() {
    let error = Error::new(
        ErrorImpl::IndentMismatch {
            expected: 2,
            found: 3,
        },
        position(1),
    );

    assert_eq!(error.severity(), Severity::Warning);
    assert!(!error.is_reduction_failure());
    assert_eq!(
        error.get_tip().to_string(),
        "Expected an indentation of 2 spaces, found 3"
    );
}

#[test]
fn test_reduction_failures_are_errors() {
    let kinds = vec![
        ErrorImpl::EmptyReduction,
        ErrorImpl::TooManyValues {
            leftover: vec!["a".to_string(), "b".to_string()],
        },
        ErrorImpl::MissingOperand {
            operator: "+".to_string(),
        },
        ErrorImpl::UnmatchedClose {
            token: ")".to_string(),
        },
        ErrorImpl::InvalidCallTarget {
            target: "(f x)".to_string(),
        },
    ];

    for kind in kinds {
        let error = Error::new(kind, position(1));
        assert_eq!(error.severity(), Severity::Error);
        assert!(error.is_reduction_failure(), "{}", error.get_error_name());
    }
}

#[test]
fn test_too_many_values_tip_lists_leftovers() {
    let error = Error::new(
        ErrorImpl::TooManyValues {
            leftover: vec!["a".to_string(), "(+ b c)".to_string()],
        },
        position(1),
    );

    assert_eq!(
        error.get_tip().to_string(),
        "Line reduced to 2 values: `a`, `(+ b c)`, is an operator missing?"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        position(1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display_includes_position() {
    let error = Error::new(
        ErrorImpl::UnmatchedClose {
            token: "]".to_string(),
        },
        position(7),
    );

    assert_eq!(error.to_string(), "test.se:7:1: unmatched closing token \"]\"");
}

#[test]
fn test_diagnostics_split_by_severity() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(Error::new(
        ErrorImpl::IndentMismatch {
            expected: 0,
            found: 1,
        },
        position(1),
    ));
    assert!(!diagnostics.has_errors());

    diagnostics.report(Error::new(ErrorImpl::EmptyReduction, position(2)));

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.warnings().count(), 1);
    assert_eq!(diagnostics.errors().count(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.into_inner()[1].get_position().line, 2);
}

#[test]
fn test_vec_is_a_sink() {
    let mut sink: Vec<Error> = Vec::new();
    sink.report(Error::new(ErrorImpl::EmptyReduction, position(3)));
    assert_eq!(sink.len(), 1);
}
