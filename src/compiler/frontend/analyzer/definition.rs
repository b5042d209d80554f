use super::{Analyzer, Error};
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::{Definition, Node, Variable};
use crate::compiler::frontend::Result;

pub fn build(name: Variable, value: Node) -> Node {
    Node::Definition(Definition {
        name,
        value: Box::new(value),
    })
}

/// Analyze a definition
///
/// ```grammar
/// <definition> -> (def <name> <value>?)
/// ```
pub fn analyze(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    match form.list_slice() {
        Some([_, Form::Symbol(name), value]) => {
            let variable = analyzer.variable(name);
            let value = analyzer.analyze(value)?;
            Ok(build(variable, value))
        }
        Some([_, Form::Symbol(name)]) => {
            let variable = analyzer.variable(name);
            Ok(build(variable, analyzer.nil()))
        }
        Some([_, _, ..]) => Error::reject("the name of a definition must be a symbol", form),
        _ => Error::reject("expected (def <name> <value>)", form),
    }
}
