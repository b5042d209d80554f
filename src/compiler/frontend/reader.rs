pub mod atom;
pub mod collection;
pub mod form;
pub mod parser;
pub mod whitespace;
use crate::compiler::source::Source;
use form::Form;
use nom::combinator::all_consuming;
use nom::error::{convert_error, VerboseError};
use nom::multi::many0;
use nom::sequence::terminated;
use nom::Err;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("ReadError: {0}")]
    ReadError(String),
    #[error("Incomplete Input")]
    IncompleteInput,
}

impl Error {
    fn from_nom(input: &str, e: Err<VerboseError<&str>>) -> Self {
        match e {
            Err::Incomplete(_) => Error::IncompleteInput,
            Err::Error(e) | Err::Failure(e) => {
                // an unterminated collection or string fails at the very end of the input
                if e.errors.iter().any(|(rest, _)| rest.is_empty()) {
                    Error::IncompleteInput
                } else {
                    Error::ReadError(convert_error(input, e))
                }
            }
        }
    }
}

/// Turns program text into `Form`s
#[derive(Debug, Clone, Default)]
pub struct Reader;

impl Reader {
    pub fn new() -> Self {
        Reader
    }

    pub fn read<T: Source>(&self, source: &mut T) -> Result<Vec<Form>> {
        let mut buffer = String::new();
        source.read_to_string(&mut buffer)?;
        self.read_str(&buffer)
    }

    pub fn read_str(&self, input: &str) -> Result<Vec<Form>> {
        let program = terminated(many0(parser::parse_form), whitespace::parse_inter_token_space);

        match all_consuming(program)(input) {
            Ok((_, forms)) => Ok(forms),
            Err(e) => Err(Error::from_nom(input, e)),
        }
    }
}
