use super::Target;
use crate::compiler::frontend::syntax::NodeKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("the {target} backend does not support {construct}")]
    Unsupported { construct: NodeKind, target: Target },

    #[error("unknown target: {0}")]
    UnknownTarget(String),
}

impl Error {
    pub fn unsupported(construct: NodeKind, target: Target) -> Self {
        Error::Unsupported { construct, target }
    }
}
