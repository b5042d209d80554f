use super::definition;
use super::lambda::analyze_params;
use super::{operands, Analyzer, Error};
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::{
    Node, ProtocolDefinition, TypeDefinition, TypeMethod, Variable,
};
use crate::compiler::frontend::Result;

/// Analyze a type definition
///
/// ```grammar
/// <deftype>  -> (deftype <name> [<attribute>*] <member>*)
/// <member>   -> <protocol> | (<method> [<param>*] <body>)
/// ```
///
/// The type is bound to `<name>` like any other definition.
pub fn analyze_type(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    match operands(form) {
        [Form::Symbol(name), Form::Vector(attributes), members @ ..] => {
            let name = analyzer.variable(name);
            let attributes = names(analyzer, form, attributes)?;
            let (protocols, methods) = analyze_members(analyzer, form, members)?;

            let definition = TypeDefinition {
                name: name.clone(),
                attributes,
                protocols,
                methods,
            };
            Ok(definition::build(name, Node::TypeDefinition(definition)))
        }
        _ => Error::reject("expected (deftype <name> [<attribute>*] <member>*)", form),
    }
}

/// Analyze a protocol definition
///
/// ```grammar
/// <defprotocol> -> (defprotocol <name> <member>*)
/// ```
pub fn analyze_protocol(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    match operands(form) {
        [Form::Symbol(name), members @ ..] => {
            let name = analyzer.variable(name);
            let (protocols, methods) = analyze_members(analyzer, form, members)?;

            Ok(Node::ProtocolDefinition(ProtocolDefinition {
                name,
                protocols,
                methods,
            }))
        }
        _ => Error::reject("expected (defprotocol <name> <member>*)", form),
    }
}

fn names(analyzer: &Analyzer, form: &Form, names: &[Form]) -> Result<Vec<Variable>> {
    names
        .iter()
        .map(|n| match n {
            Form::Symbol(name) => Ok(analyzer.variable(name)),
            _ => Error::reject("attribute names must be symbols", form),
        })
        .collect()
}

fn analyze_members(
    analyzer: &mut Analyzer,
    form: &Form,
    members: &[Form],
) -> Result<(Vec<Variable>, Vec<TypeMethod>)> {
    let mut protocols = vec![];
    let mut methods = vec![];

    for member in members {
        match member {
            Form::Symbol(protocol) => protocols.push(analyzer.variable(protocol)),
            Form::List(elements) => match &elements[..] {
                [Form::Symbol(name), Form::Vector(params), body @ ..] => {
                    methods.push(TypeMethod {
                        name: analyzer.variable(name),
                        params: analyze_params(analyzer, form, params)?,
                        body: analyzer.analyze_body(body)?,
                    })
                }
                _ => return Error::reject("expected (<method> [<param>*] <body>)", form),
            },
            _ => return Error::reject("expected a protocol name or a method", form),
        }
    }

    Ok((protocols, methods))
}

#[cfg(test)]
mod tests {
    use super::super::tests::{analyze, assert_invalid};
    use super::*;

    #[test]
    fn test_deftype() {
        match analyze("(deftype Point [x y] Show (show [] (str x y)))").unwrap() {
            Node::Definition(def) => {
                assert_eq!(def.name, Variable::new(None, "Point"));
                match *def.value {
                    Node::TypeDefinition(ty) => {
                        assert_eq!(ty.attributes.len(), 2);
                        assert_eq!(ty.protocols, vec![Variable::new(None, "Show")]);
                        assert_eq!(ty.methods[0].name, Variable::new(None, "show"));
                        assert!(ty.methods[0].params.fixed.is_empty());
                    }
                    other => panic!("expected type definition, got {:?}", other),
                }
            }
            other => panic!("expected definition, got {:?}", other),
        }
    }

    #[test]
    fn test_defprotocol() {
        match analyze("(defprotocol Show (show [] nil) (show-with [prefix] prefix))").unwrap() {
            Node::ProtocolDefinition(proto) => {
                assert_eq!(proto.methods.len(), 2);
                assert_eq!(proto.methods[1].params.required(), 1);
            }
            other => panic!("expected protocol definition, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_types() {
        assert_invalid("(deftype Point)");
        assert_invalid("(deftype Point [1])");
        assert_invalid("(deftype Point [x] 1)");
        assert_invalid("(deftype Point [x] (show x))");
        assert_invalid("(defprotocol)");
    }
}
