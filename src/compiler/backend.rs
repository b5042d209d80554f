pub mod error;
pub mod javascript;
pub mod ruby;

use super::frontend::syntax::operator::ArithmeticOperator;
use super::frontend::syntax::{Lambda, Node, NodeKind};
use super::utils::mangle::Mangler;
use std::fmt;
use std::str::FromStr;

pub type Result<T> = std::result::Result<T, error::Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    JavaScript,
    Ruby,
}

/// Lowers nodes to the source text of one target.
pub trait CodeGenerator {
    fn target(&self) -> Target;

    fn generate(&self, node: &Node) -> Result<String>;

    fn generate_lambda(&self, lambda: &Lambda) -> Result<String>;

    fn ensure_supported(&self, kind: NodeKind) -> Result<()> {
        if self.target().supports(kind) {
            Ok(())
        } else {
            Err(error::Error::unsupported(kind, self.target()))
        }
    }
}

const RUBY_UNSUPPORTED: &[NodeKind] = &[
    NodeKind::Loop,
    NodeKind::RecursionPoint,
    NodeKind::ExceptionHandler,
    NodeKind::TypeDefinition,
    NodeKind::TypeMethod,
    NodeKind::ProtocolDefinition,
];

impl Target {
    pub fn name(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::Ruby => "ruby",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::Ruby => "rb",
        }
    }

    pub fn mangler(&self) -> &'static Mangler {
        match self {
            Self::JavaScript => &javascript::MANGLER,
            Self::Ruby => &ruby::MANGLER,
        }
    }

    /// Node kinds the target has no lowering for.
    pub fn unsupported(&self) -> &'static [NodeKind] {
        match self {
            Self::JavaScript => &[],
            Self::Ruby => RUBY_UNSUPPORTED,
        }
    }

    pub fn supports(&self, kind: NodeKind) -> bool {
        !self.unsupported().contains(&kind)
    }

    pub fn code_generator(&self) -> Box<dyn CodeGenerator> {
        match self {
            Self::JavaScript => Box::new(javascript::code_generator::CodeGenerator::new()),
            Self::Ruby => Box::new(ruby::code_generator::CodeGenerator::new()),
        }
    }

    pub fn generate(&self, node: &Node) -> Result<String> {
        self.code_generator().generate(node)
    }

    pub fn generate_lambda(&self, lambda: &Lambda) -> Result<String> {
        self.code_generator().generate_lambda(lambda)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "js" | "javascript" => Ok(Self::JavaScript),
            "rb" | "ruby" => Ok(Self::Ruby),
            other => Err(error::Error::UnknownTarget(other.to_string())),
        }
    }
}

/// Arithmetic emission shared by all targets.
///
/// Add and subtract without operands are 0, with one operand they prefix it.
/// Multiply and divide without operands are 1, with one operand they are the
/// operand itself. Everything else is a parenthesized infix chain.
pub fn arithmetic(operator: ArithmeticOperator, token: &str, operands: Vec<String>) -> String {
    match (operator, operands.len()) {
        (ArithmeticOperator::Add, 0) | (ArithmeticOperator::Subtract, 0) => "0".to_string(),
        (ArithmeticOperator::Multiply, 0) | (ArithmeticOperator::Divide, 0) => "1".to_string(),
        (ArithmeticOperator::Add, 1) | (ArithmeticOperator::Subtract, 1) => {
            prefix(token, &operands[0])
        }
        (_, 1) => operands[0].clone(),
        _ => format!("({})", operands.join(token)),
    }
}

/// Prefix `operand` with `token`, parenthesizing operands that start with a
/// sign so `-` and `-5` don't fuse into `--5`.
pub fn prefix(token: &str, operand: &str) -> String {
    if operand.starts_with('-') || operand.starts_with('+') {
        format!("{}({})", token, operand)
    } else {
        format!("{}{}", token, operand)
    }
}
