use super::{operands, Analyzer, Error};
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::{
    Assignment, ClassInstantiation, MethodResolution, Node, PropertyResolution,
};
use crate::compiler::frontend::Result;

/// ```grammar
/// <new> -> (new <class> <argument>*)
/// ```
pub fn analyze_new(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    match operands(form) {
        [class, args @ ..] => Ok(Node::ClassInstantiation(ClassInstantiation {
            class: Box::new(analyzer.analyze(class)?),
            args: analyzer.analyze_all(args)?,
        })),
        _ => Error::reject("expected (new <class> <argument>*)", form),
    }
}

/// ```grammar
/// <method> -> (. <object> <name>) | (. <object> (<name> <argument>*))
/// ```
pub fn analyze_method(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    let (object, member) = match operands(form) {
        [object, member] => (object, member),
        _ => return Error::reject("method resolution should be a list of 3 elements", form),
    };

    let (method, args) = match member {
        Form::Symbol(name) => (name, &[][..]),
        Form::List(elements) => match &elements[..] {
            [Form::Symbol(name), args @ ..] => (name, args),
            _ => return Error::reject("expected (<name> <argument>*) as method call", form),
        },
        _ => {
            return Error::reject(
                "the third element of a method resolution must be a symbol or a list",
                form,
            )
        }
    };

    Ok(Node::MethodResolution(MethodResolution {
        object: Box::new(analyzer.analyze(object)?),
        method: analyzer.variable(method),
        args: analyzer.analyze_all(args)?,
    }))
}

/// ```grammar
/// <property> -> (.- <object> <name>)
/// ```
pub fn analyze_property(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    match operands(form) {
        [object, Form::Symbol(property)] => Ok(Node::PropertyResolution(PropertyResolution {
            object: Box::new(analyzer.analyze(object)?),
            property: analyzer.variable(property),
        })),
        _ => Error::reject("expected (.- <object> <name>)", form),
    }
}

/// ```grammar
/// <assignment> -> (set! <target> <value>)
/// ```
pub fn analyze_assignment(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    match operands(form) {
        [target @ Form::Symbol(_), value] | [target @ Form::List(_), value] => {
            Ok(Node::Assignment(Assignment {
                target: Box::new(analyzer.analyze(target)?),
                value: Box::new(analyzer.analyze(value)?),
            }))
        }
        _ => Error::reject("expected (set! <target> <value>)", form),
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{analyze, assert_invalid};
    use super::*;
    use crate::compiler::frontend::syntax::Variable;

    #[test]
    fn test_new() {
        match analyze("(new Date 2020 1)").unwrap() {
            Node::ClassInstantiation(new) => {
                assert_eq!(*new.class, Node::Variable(Variable::new(None, "Date")));
                assert_eq!(new.args.len(), 2);
            }
            other => panic!("expected class instantiation, got {:?}", other),
        }
        assert_invalid("(new)");
    }

    #[test]
    fn test_method_without_arguments() {
        match analyze("(. obj toString)").unwrap() {
            Node::MethodResolution(res) => {
                assert_eq!(res.method, Variable::new(None, "toString"));
                assert!(res.args.is_empty());
            }
            other => panic!("expected method resolution, got {:?}", other),
        }
    }

    #[test]
    fn test_method_with_arguments() {
        match analyze("(. obj (push 1 2))").unwrap() {
            Node::MethodResolution(res) => assert_eq!(res.args.len(), 2),
            other => panic!("expected method resolution, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_method_resolution() {
        assert_invalid("(. obj)");
        assert_invalid("(. obj push 1)");
        assert_invalid("(. obj 1)");
        assert_invalid("(. obj (1 2))");
    }

    #[test]
    fn test_property() {
        assert_matches!(analyze("(.- obj length)"), Ok(Node::PropertyResolution(_)));
        assert_invalid("(.- obj)");
        assert_invalid("(.- obj 1)");
    }

    #[test]
    fn test_assignment() {
        assert_matches!(analyze("(set! x 1)"), Ok(Node::Assignment(_)));
        assert_matches!(analyze("(set! (.- obj x) 1)"), Ok(Node::Assignment(_)));
        assert_invalid("(set! x)");
        assert_invalid("(set! 1 2)");
    }
}
