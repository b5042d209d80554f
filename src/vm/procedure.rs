use super::environment::Environment;
use super::error::Result;
use super::interpreter::Interpreter;
use super::value::Value;
use crate::compiler::frontend::syntax::Lambda;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Between(min, max) => count >= min && count <= max,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Between(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

pub type ForeignFunction = fn(&mut Interpreter, Vec<Value>) -> Result<Value>;

/// A procedure implemented in rust.
pub struct Foreign {
    pub name: &'static str,
    pub arity: Arity,
    function: ForeignFunction,
}

impl Foreign {
    pub fn new(name: &'static str, arity: Arity, function: ForeignFunction) -> Self {
        Self {
            name,
            arity,
            function,
        }
    }

    pub fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value> {
        (self.function)(interpreter, arguments)
    }
}

/// A lambda together with the environment it was created in.
pub struct Closure {
    pub lambda: Rc<Lambda>,
    pub env: Environment,
}

impl Closure {
    /// The arities of all clauses, e.g. `0, 1 or at least 2`.
    pub fn arity_description(&self) -> String {
        let arities: Vec<String> = self
            .lambda
            .clauses()
            .iter()
            .map(|clause| {
                if clause.params.is_variadic() {
                    Arity::AtLeast(clause.params.required()).to_string()
                } else {
                    Arity::Exactly(clause.params.required()).to_string()
                }
            })
            .collect();

        match arities.split_last() {
            Some((last, init)) if !init.is_empty() => format!("{} or {}", init.join(", "), last),
            _ => arities.join(""),
        }
    }
}

pub enum Procedure {
    Closure(Closure),
    Foreign(Foreign),
}

impl Procedure {
    pub fn closure(lambda: Rc<Lambda>, env: Environment) -> Self {
        Procedure::Closure(Closure { lambda, env })
    }

    pub fn foreign(name: &'static str, arity: Arity, function: ForeignFunction) -> Self {
        Procedure::Foreign(Foreign::new(name, arity, function))
    }

    pub fn name(&self) -> &str {
        match self {
            Procedure::Closure(_) => "fn",
            Procedure::Foreign(foreign) => foreign.name,
        }
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Procedure::Closure(closure) => {
                write!(f, "Closure({})", closure.arity_description())
            }
            Procedure::Foreign(foreign) => write!(f, "ForeignProcedure({})", foreign.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::frontend::syntax::{Block, LambdaClause, Params, Variable};

    fn clause(fixed: usize, variadic: bool) -> LambdaClause {
        LambdaClause {
            params: Params {
                fixed: (0..fixed)
                    .map(|i| Variable::new(None, format!("p{}", i)))
                    .collect(),
                rest: if variadic {
                    Some(Variable::new(None, "rest"))
                } else {
                    None
                },
            },
            body: Block::default(),
        }
    }

    #[test]
    fn test_arity_accepts() {
        assert!(Arity::Exactly(2).accepts(2));
        assert!(!Arity::Exactly(2).accepts(3));
        assert!(Arity::AtLeast(1).accepts(4));
        assert!(!Arity::AtLeast(1).accepts(0));
        assert!(Arity::Between(2, 3).accepts(3));
        assert!(!Arity::Between(2, 3).accepts(4));
    }

    #[test]
    fn test_arity_description() {
        let single = Closure {
            lambda: Rc::new(Lambda::Single(clause(2, false))),
            env: Environment::default(),
        };
        assert_eq!(single.arity_description(), "2");

        let multi = Closure {
            lambda: Rc::new(Lambda::Multi(vec![
                clause(0, false),
                clause(1, false),
                clause(2, true),
            ])),
            env: Environment::default(),
        };
        assert_eq!(multi.arity_description(), "0, 1 or at least 2");
    }
}
