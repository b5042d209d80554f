use super::value::Value;
use crate::compiler::frontend::syntax::NodeKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("UnboundVariable: `{0}` is not defined")]
    UnboundVariable(String),

    #[error("ArityError: {name} expected {expected} arguments but received {got}")]
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },

    #[error("ApplicationError: `{0}` is not callable")]
    NotCallable(String),

    #[error("ArgumentError: expected {expected}, got `{got}`")]
    WrongType { expected: &'static str, got: String },

    #[error("ArgumentError: {0}")]
    ArgumentError(String),

    #[error("ArithmeticError: {0}")]
    ArithmeticError(String),

    #[error("recur is only allowed in tail position of a loop or function body")]
    RecurOutsideLoop,

    #[error("{0} can't be evaluated at compile time")]
    Unsupported(NodeKind),

    #[error("{0} can't be evaluated at compile time")]
    UnsupportedOperator(&'static str),

    #[error("uncaught exception: {0}")]
    Thrown(Value),
}

pub fn arity_mismatch<N: Into<String>, E: Into<String>>(name: N, expected: E, got: usize) -> Error {
    Error::ArityMismatch {
        name: name.into(),
        expected: expected.into(),
        got,
    }
}

pub fn wrong_type(expected: &'static str, got: &Value) -> Error {
    Error::WrongType {
        expected,
        got: got.to_string(),
    }
}

pub fn argument_error<M: Into<String>>(message: M) -> Error {
    Error::ArgumentError(message.into())
}

pub fn arithmetic_error<M: Into<String>>(message: M) -> Error {
    Error::ArithmeticError(message.into())
}
