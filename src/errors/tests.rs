//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.con".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(error.is_syntax_error());
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        at(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(*error.get_position().1, "test.con");
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            expected: "int".to_string(),
            received: "string".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "TypeMismatch");
    assert!(!error.is_syntax_error());
    assert_eq!(error.get_tip().to_string(), "Expected type `int`, received `string`");
}

#[test]
fn test_semantic_error_names() {
    let cases = vec![
        (ErrorImpl::DuplicateDeclaration { name: "x".to_string() }, "DuplicateDeclaration"),
        (ErrorImpl::UnknownIdentifier { name: "x".to_string() }, "UnknownIdentifier"),
        (ErrorImpl::ArityMismatch { expected: 2, received: 3 }, "ArityMismatch"),
        (ErrorImpl::IllegalCast { from: "int".to_string(), to: "bool".to_string() }, "IllegalCast"),
        (ErrorImpl::NonIntegerIndex { received: "float".to_string() }, "NonIntegerIndex"),
        (ErrorImpl::BreakOutsideLoop, "BreakOutsideLoop"),
        (ErrorImpl::ReturnOutsideFunction, "ReturnOutsideFunction"),
        (ErrorImpl::VoidFunctionReturnsValue { function: "f".to_string() }, "VoidFunctionReturnsValue"),
        (ErrorImpl::CallOfNonFunction { name: "x".to_string() }, "CallOfNonFunction"),
    ];

    for (kind, name) in cases {
        let error = Error::new(kind, at(0));
        assert_eq!(error.get_error_name(), name);
        assert!(!error.is_syntax_error());
    }
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_arity_mismatch_tip() {
    let error = Error::new(
        ErrorImpl::ArityMismatch {
            expected: 2,
            received: 3,
        },
        at(0),
    );

    assert_eq!(error.get_tip().to_string(), "Expected 2 arguments, received 3");
}

#[test]
fn test_error_display_includes_location() {
    let error = Error::new(ErrorImpl::BreakOutsideLoop, at(7));
    assert_eq!(error.to_string(), "break outside of a loop at test.con:7");
}
