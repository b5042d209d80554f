use super::{operands, Analyzer, Error};
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::{Lambda, LambdaClause, Node, Params};
use crate::compiler::frontend::Result;

/// Analyze a function expression
///
/// ```grammar
/// <lambda>  -> (fn <clause-body>) | (fn (<clause-body>) ...)
/// <clause-body> -> [<param>* <rest>?] <body>
/// <rest>    -> & <param>
/// ```
pub fn analyze(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    analyze_lambda(analyzer, form, operands(form)).map(Node::Lambda)
}

/// Analyze everything that follows the head of a function expression.
pub fn analyze_lambda(analyzer: &mut Analyzer, form: &Form, definition: &[Form]) -> Result<Lambda> {
    match definition {
        [Form::Vector(params), body @ ..] => {
            Ok(Lambda::Single(analyze_clause(analyzer, form, params, body)?))
        }
        [Form::List(_), ..] => {
            let mut clauses = Vec::with_capacity(definition.len());

            for clause in definition {
                match clause.list_slice() {
                    Some([Form::Vector(params), body @ ..]) => {
                        clauses.push(analyze_clause(analyzer, form, params, body)?)
                    }
                    _ => {
                        return Error::reject(
                            "each clause of a function expression must start with a parameter vector",
                            form,
                        )
                    }
                }
            }

            check_arities(&clauses, form)?;
            Ok(Lambda::Multi(clauses))
        }
        _ => Error::reject(
            "the second element of a function expression must be a vector or a list",
            form,
        ),
    }
}

fn analyze_clause(
    analyzer: &mut Analyzer,
    form: &Form,
    params: &[Form],
    body: &[Form],
) -> Result<LambdaClause> {
    Ok(LambdaClause {
        params: analyze_params(analyzer, form, params)?,
        body: analyzer.analyze_body(body)?,
    })
}

pub fn analyze_params(analyzer: &mut Analyzer, form: &Form, params: &[Form]) -> Result<Params> {
    let mut fixed = Vec::with_capacity(params.len());
    let mut remaining = params.iter();

    while let Some(param) = remaining.next() {
        match param {
            Form::Symbol(name) if name == "&" => {
                return match (remaining.next(), remaining.next()) {
                    (Some(Form::Symbol(rest)), None) if rest != "&" => Ok(Params {
                        fixed,
                        rest: Some(analyzer.variable(rest)),
                    }),
                    (None, _) => Error::reject("expected a name after &", form),
                    _ => Error::reject("cannot list parameters after the rest parameter", form),
                };
            }
            Form::Symbol(name) => fixed.push(analyzer.variable(name)),
            _ => return Error::reject("parameters must be symbols", form),
        }
    }

    Ok(Params { fixed, rest: None })
}

fn check_arities(clauses: &[LambdaClause], form: &Form) -> Result<()> {
    let variadic: Vec<&Params> = clauses
        .iter()
        .map(|c| &c.params)
        .filter(|p| p.is_variadic())
        .collect();

    if variadic.len() > 1 {
        return Error::reject("a function can have only one variadic clause", form);
    }

    let mut seen = Vec::with_capacity(clauses.len());
    for params in clauses.iter().map(|c| &c.params).filter(|p| !p.is_variadic()) {
        if seen.contains(&params.required()) {
            return Error::reject("a function can't have two clauses with the same arity", form);
        }
        if let Some(rest) = variadic.first() {
            if params.required() > rest.required() {
                return Error::reject(
                    "a fixed arity clause can't have more parameters than the variadic clause",
                    form,
                );
            }
        }
        seen.push(params.required());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::{analyze, assert_invalid};
    use super::*;
    use crate::compiler::frontend::syntax::Variable;

    fn lambda(input: &str) -> Lambda {
        match analyze(input).unwrap() {
            Node::Lambda(lambda) => lambda,
            other => panic!("expected lambda, got {:?}", other),
        }
    }

    #[test]
    fn test_single_arity() {
        match lambda("(fn [a b] (+ a b))") {
            Lambda::Single(clause) => {
                assert_eq!(
                    clause.params.fixed,
                    vec![Variable::new(None, "a"), Variable::new(None, "b")]
                );
                assert!(!clause.params.is_variadic());
                assert_eq!(clause.body.expressions.len(), 1);
            }
            other => panic!("expected single arity, got {:?}", other),
        }
    }

    #[test]
    fn test_rest_parameter() {
        match lambda("(fn [a & more] more)") {
            Lambda::Single(clause) => {
                assert_eq!(clause.params.required(), 1);
                assert_eq!(clause.params.rest, Some(Variable::new(None, "more")));
            }
            other => panic!("expected single arity, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_arity() {
        match lambda("(fn ([] 0) ([a] a) ([a & more] more))") {
            Lambda::Multi(clauses) => assert_eq!(clauses.len(), 3),
            other => panic!("expected multi arity, got {:?}", other),
        }
    }

    #[test]
    fn test_last_body_expression_is_tail() {
        match lambda("(fn [] (f) (g))") {
            Lambda::Single(clause) => {
                assert!(!clause.body.expressions[0].is_tail_application());
                assert!(clause.body.expressions[1].is_tail_application());
            }
            other => panic!("expected single arity, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_lambdas() {
        assert_invalid("(fn)");
        assert_invalid("(fn a b)");
        assert_invalid("(fn [a &])");
        assert_invalid("(fn [& a b])");
        assert_invalid("(fn [1] 1)");
        assert_invalid("(fn ([a] a) ([b] b))");
        assert_invalid("(fn ([& a] a) ([& b] b))");
        assert_invalid("(fn ([a] a) 1)");
    }
}
