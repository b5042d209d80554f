pub mod analyzer;
pub mod error;
pub mod expander;
pub mod reader;
pub mod syntax;

use super::session::Session;
use super::source::Source;
use analyzer::Analyzer;
use reader::form::Form;
use syntax::Node;

pub type Result<T> = std::result::Result<T, error::Error>;

/// Reading and analysis.
#[derive(Debug, Clone, Default)]
pub struct Frontend {
    reader: reader::Reader,
}

impl Frontend {
    pub fn new() -> Self {
        Frontend {
            reader: reader::Reader::new(),
        }
    }

    pub fn read<T: Source>(&self, source: &mut T) -> Result<Vec<Form>> {
        Ok(self.reader.read(source)?)
    }

    pub fn read_str(&self, input: &str) -> Result<Vec<Form>> {
        Ok(self.reader.read_str(input)?)
    }

    pub fn analyze(&self, session: &mut Session, form: &Form) -> Result<Node> {
        Analyzer::new(session).analyze(form)
    }
}
