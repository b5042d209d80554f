use crate::compiler::backend;
use crate::compiler::frontend;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    FrontendError(#[from] frontend::error::Error),

    #[error(transparent)]
    BackendError(#[from] backend::error::Error),
}

impl Error {
    /// Whether more input could turn the source into a complete program.
    pub fn is_incomplete_input(&self) -> bool {
        match self {
            Error::FrontendError(e) => e.is_incomplete_input(),
            Error::BackendError(_) => false,
        }
    }
}
