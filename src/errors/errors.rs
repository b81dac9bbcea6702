use std::fmt::Display;

use thiserror::Error;

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

    /// Syntax errors come from the lexer and parser; everything else is semantic.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::UnexpectedToken { .. }
                | ErrorImpl::UnexpectedTokenDetailed { .. }
                | ErrorImpl::NumberParseError { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UnknownIdentifier { .. } => "UnknownIdentifier",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            ErrorImpl::IllegalCast { .. } => "IllegalCast",
            ErrorImpl::NonIntegerIndex { .. } => "NonIntegerIndex",
            ErrorImpl::BreakOutsideLoop => "BreakOutsideLoop",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::VoidFunctionReturnsValue { .. } => "VoidFunctionReturnsValue",
            ErrorImpl::NonVoidFunctionMissingValue { .. } => "NonVoidFunctionMissingValue",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::ArrayTypeMismatch { .. } => "ArrayTypeMismatch",
            ErrorImpl::CallOfNonFunction { .. } => "CallOfNonFunction",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DuplicateDeclaration { name } => {
                ErrorTip::Suggestion(format!("Identifier `{}` already declared in this scope", name))
            }
            ErrorImpl::UnknownIdentifier { name } => {
                ErrorTip::Suggestion(format!("Identifier `{}` does not exist", name))
            }
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArityMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::IllegalCast { from, to } => {
                ErrorTip::Suggestion(format!("Cannot cast `{}` to `{}`", from, to))
            }
            ErrorImpl::NonIntegerIndex { received } => ErrorTip::Suggestion(format!(
                "Array indices and sizes must be `int`, received `{}`",
                received
            )),
            ErrorImpl::BreakOutsideLoop => {
                ErrorTip::Suggestion(String::from("`break` can only appear inside a loop"))
            }
            ErrorImpl::ReturnOutsideFunction => {
                ErrorTip::Suggestion(String::from("`return` can only appear inside a function"))
            }
            ErrorImpl::VoidFunctionReturnsValue { function } => ErrorTip::Suggestion(format!(
                "Function `{}` is declared `void` and cannot return a value",
                function
            )),
            ErrorImpl::NonVoidFunctionMissingValue { function, expected } => {
                ErrorTip::Suggestion(format!(
                    "Function `{}` must return a value of type `{}`",
                    function, expected
                ))
            }
            ErrorImpl::ReturnTypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected return type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArrayTypeMismatch { left, right } => ErrorTip::Suggestion(format!(
                "Cannot combine `{}` with `{}`",
                left, right
            )),
            ErrorImpl::CallOfNonFunction { name } => {
                ErrorTip::Suggestion(format!("`{}` is not a function", name))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.internal_error, self.position.1, self.position.0)
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
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("identifier {name:?} already declared")]
    DuplicateDeclaration { name: String },
    #[error("identifier {name:?} does not exist")]
    UnknownIdentifier { name: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("wrong number of arguments: expected {expected}, received {received}")]
    ArityMismatch { expected: usize, received: usize },
    #[error("argument types do not match: expected {expected}, received {received}")]
    ArgumentTypeMismatch { expected: String, received: String },
    #[error("cannot cast {from} to {to}")]
    IllegalCast { from: String, to: String },
    #[error("index or size must be int, received {received}")]
    NonIntegerIndex { received: String },
    #[error("break outside of a loop")]
    BreakOutsideLoop,
    #[error("return outside of a function")]
    ReturnOutsideFunction,
    #[error("void function {function:?} returns a value")]
    VoidFunctionReturnsValue { function: String },
    #[error("function {function:?} must return a value of type {expected}")]
    NonVoidFunctionMissingValue { function: String, expected: String },
    #[error("return types do not match: expected {expected}, received {received}")]
    ReturnTypeMismatch { expected: String, received: String },
    #[error("array types do not match: {left} and {right}")]
    ArrayTypeMismatch { left: String, right: String },
    #[error("{name:?} is not a function")]
    CallOfNonFunction { name: String },
}
