use super::{operands, Analyzer, Error};
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::{Conditional, Node};
use crate::compiler::frontend::Result;

pub fn build(branches: Vec<(Node, Node)>, default: Node) -> Node {
    Node::Conditional(Conditional {
        branches,
        default: Box::new(default),
    })
}

fn is_else(form: &Form) -> bool {
    form.as_keyword() == Some("else")
}

/// Analyze a multi-way conditional
///
/// ```grammar
/// <cond> -> (cond <test> <consequent> ... :else <alternate>)
/// ```
///
/// `:else` may appear in any clause pair. Its consequent is the default, tried
/// after every other test, and a later `:else` replaces an earlier one.
/// Without an `:else` clause the conditional evaluates to nil when no test holds.
pub fn analyze_cond(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    let clauses = operands(form);

    if clauses.len() % 2 != 0 {
        return Error::reject("cond requires an even number of forms", form);
    }

    let mut branches = Vec::with_capacity(clauses.len() / 2);
    let mut default = None;

    for clause in clauses.chunks(2) {
        let (test, consequent) = (&clause[0], &clause[1]);

        if is_else(test) {
            default = Some(analyzer.analyze(consequent)?.in_tail_position());
        } else {
            let test = analyzer.analyze(test)?;
            let consequent = analyzer.analyze(consequent)?.in_tail_position();
            branches.push((test, consequent));
        }
    }

    let default = match default {
        Some(node) => node,
        None => analyzer.nil(),
    };

    Ok(build(branches, default))
}

/// Analyze a two-way conditional
///
/// ```grammar
/// <if> -> (if <test> <consequent> <alternate>?)
/// ```
pub fn analyze_if(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    match operands(form) {
        [test, consequent, alternate] => {
            let test = analyzer.analyze(test)?;
            let consequent = analyzer.analyze(consequent)?.in_tail_position();
            let alternate = analyzer.analyze(alternate)?.in_tail_position();
            Ok(build(vec![(test, consequent)], alternate))
        }
        [test, consequent] => {
            let test = analyzer.analyze(test)?;
            let consequent = analyzer.analyze(consequent)?.in_tail_position();
            Ok(build(vec![(test, consequent)], analyzer.nil()))
        }
        _ => Error::reject("expected (if <test> <consequent> <alternate>?)", form),
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{analyze, assert_invalid};
    use super::*;

    fn conditional(input: &str) -> Conditional {
        match analyze(input).unwrap() {
            Node::Conditional(cond) => cond,
            other => panic!("expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn test_cond_with_else() {
        let cond = conditional("(cond a 1 b 2 :else 3)");

        assert_eq!(cond.branches.len(), 2);
        assert_matches!(*cond.default, Node::Integer(_));
    }

    #[test]
    fn test_cond_without_else_defaults_to_nil() {
        let cond = conditional("(cond a 1)");

        assert_eq!(cond.branches.len(), 1);
        assert_matches!(*cond.default, Node::Nil(_));
    }

    #[test]
    fn test_cond_only_else() {
        let cond = conditional("(cond :else 3)");

        assert!(cond.branches.is_empty());
    }

    #[test]
    fn test_branches_are_tail_positions() {
        let cond = conditional("(cond (p) (f) :else (g))");

        assert!(!cond.branches[0].0.is_tail_application());
        assert!(cond.branches[0].1.is_tail_application());
        assert!(cond.default.is_tail_application());
    }

    #[test]
    fn test_if() {
        let cond = conditional("(if a 1 2)");
        assert_eq!(cond.branches.len(), 1);
        assert_matches!(*cond.default, Node::Integer(_));

        let cond = conditional("(if a 1)");
        assert_matches!(*cond.default, Node::Nil(_));
    }

    #[test]
    fn test_else_anywhere_is_the_default() {
        let cond = conditional("(cond :else 1 a 2)");
        assert_eq!(cond.branches.len(), 1);
        assert_matches!(&*cond.default, Node::Integer(i) if **i == 1);

        let cond = conditional("(cond :else 1 a 2 :else 3)");
        assert_matches!(&*cond.default, Node::Integer(i) if **i == 3);
    }

    #[test]
    fn test_invalid_conditionals() {
        assert_invalid("(cond a)");
        assert_invalid("(if a)");
        assert_invalid("(if a b c d)");
    }
}
