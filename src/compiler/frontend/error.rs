use super::analyzer;
use super::expander;
use super::reader;
use crate::compiler::backend;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    ReadError(#[from] reader::Error),

    #[error(transparent)]
    AnalysisError(#[from] analyzer::Error),

    #[error(transparent)]
    MacroExpansionError(#[from] expander::Error),

    // macro functions are compiled to target text before they are loaded
    #[error(transparent)]
    GenerationError(#[from] backend::error::Error),
}

impl Error {
    pub fn is_incomplete_input(&self) -> bool {
        matches!(self, Error::ReadError(reader::Error::IncompleteInput))
    }
}
