use super::{operands, Analyzer, Error};
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::{Loop, Node, RecursionPoint};
use crate::compiler::frontend::Result;

/// Analyze a loop
///
/// ```grammar
/// <loop> -> (loop [<name> <init> ...] <body>)
/// ```
pub fn analyze_loop(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    match operands(form) {
        [Form::Vector(bindings), body @ ..] => {
            if bindings.len() % 2 != 0 {
                return Error::reject("loop bindings must come in pairs", form);
            }

            let mut analyzed = Vec::with_capacity(bindings.len() / 2);
            for binding in bindings.chunks(2) {
                match &binding[0] {
                    Form::Symbol(name) => {
                        let variable = analyzer.variable(name);
                        analyzed.push((variable, analyzer.analyze(&binding[1])?));
                    }
                    _ => return Error::reject("loop binding names must be symbols", form),
                }
            }

            Ok(Node::Loop(Loop {
                bindings: analyzed,
                body: analyzer.analyze_block(body)?,
            }))
        }
        _ => Error::reject("expected (loop [<bindings>] <body>)", form),
    }
}

/// Analyze a recursion point
///
/// ```grammar
/// <recur> -> (recur <expression>*)
/// ```
pub fn analyze_recur(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    Ok(Node::RecursionPoint(RecursionPoint {
        args: analyzer.analyze_all(operands(form))?,
    }))
}

#[cfg(test)]
mod tests {
    use super::super::tests::{analyze, assert_invalid};
    use super::*;
    use crate::compiler::frontend::syntax::Variable;

    #[test]
    fn test_loop() {
        match analyze("(loop [i 0 acc 1] (recur (+ i 1) acc))").unwrap() {
            Node::Loop(lp) => {
                assert_eq!(lp.bindings.len(), 2);
                assert_eq!(lp.bindings[1].0, Variable::new(None, "acc"));
                assert_matches!(lp.body.expressions[0], Node::RecursionPoint(_));
            }
            other => panic!("expected loop, got {:?}", other),
        }
    }

    #[test]
    fn test_recur() {
        match analyze("(recur 1 2)").unwrap() {
            Node::RecursionPoint(point) => assert_eq!(point.args.len(), 2),
            other => panic!("expected recursion point, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_loops() {
        assert_invalid("(loop)");
        assert_invalid("(loop [i] i)");
        assert_invalid("(loop [1 2] i)");
        assert_invalid("(loop i)");
    }
}
