use crate::compiler::frontend::reader::form::Form;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid form {form}: {message}")]
    InvalidForm { message: String, form: Form },

    #[error("unknown operator {operator} in {form}")]
    UnknownOperator { operator: String, form: Form },

    #[error("wrong number of arguments to {operator}, got: {got}, expected: {expected} in {form}")]
    ArityMismatch {
        operator: String,
        expected: usize,
        got: usize,
        form: Form,
    },
}

impl Error {
    pub fn invalid_form<M: Into<String>>(message: M, form: &Form) -> Self {
        Error::InvalidForm {
            message: message.into(),
            form: form.clone(),
        }
    }

    pub fn unknown_operator<O: Into<String>>(operator: O, form: &Form) -> Self {
        Error::UnknownOperator {
            operator: operator.into(),
            form: form.clone(),
        }
    }

    pub fn arity_mismatch<O: Into<String>>(
        operator: O,
        expected: usize,
        got: usize,
        form: &Form,
    ) -> Self {
        Error::ArityMismatch {
            operator: operator.into(),
            expected,
            got,
            form: form.clone(),
        }
    }

    /// Shorthand for the most common failure of the analysis functions.
    pub fn reject<T, M: Into<String>>(
        message: M,
        form: &Form,
    ) -> std::result::Result<T, crate::compiler::frontend::error::Error> {
        Err(Self::invalid_form(message, form).into())
    }
}
