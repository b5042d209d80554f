use super::{operands, Analyzer, Error};
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::{CatchClause, Exception, ExceptionHandler, Node};
use crate::compiler::frontend::Result;

/// Analyze a throw
///
/// ```grammar
/// <throw> -> (throw <expression>)
/// ```
pub fn analyze_throw(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    match operands(form) {
        [expression] => Ok(Node::Exception(Exception {
            expression: Box::new(analyzer.analyze(expression)?),
        })),
        _ => Error::reject("expected (throw <expression>)", form),
    }
}

fn is_clause(form: &Form) -> bool {
    matches!(form.head_symbol(), Some("catch") | Some("finally"))
}

/// Analyze an exception handler
///
/// ```grammar
/// <try>     -> (try <body> <catch>? <finally>?)
/// <catch>   -> (catch <name> <body>)
/// <finally> -> (finally <body>)
/// ```
///
/// At least one of catch and finally must be present.
pub fn analyze_try(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    let operands = operands(form);
    let split = operands
        .iter()
        .position(is_clause)
        .unwrap_or_else(|| operands.len());
    let (body, clauses) = operands.split_at(split);

    let body = analyzer.analyze_block(body)?;
    let mut catch = None;
    let mut finally = None;

    for clause in clauses {
        match clause.list_slice() {
            Some([Form::Symbol(head), Form::Symbol(binding), handler @ ..])
                if head == "catch" && catch.is_none() && finally.is_none() =>
            {
                catch = Some(CatchClause {
                    binding: analyzer.variable(binding),
                    body: analyzer.analyze_block(handler)?,
                });
            }
            Some([Form::Symbol(head), cleanup @ ..]) if head == "finally" && finally.is_none() => {
                finally = Some(analyzer.analyze_block(cleanup)?);
            }
            _ => {
                return Error::reject(
                    "expected (catch <name> <body>) followed by (finally <body>) at the end of try",
                    form,
                )
            }
        }
    }

    if catch.is_none() && finally.is_none() {
        return Error::reject("try requires a catch or a finally clause", form);
    }

    Ok(Node::ExceptionHandler(ExceptionHandler {
        body,
        catch,
        finally,
    }))
}

#[cfg(test)]
mod tests {
    use super::super::tests::{analyze, assert_invalid};
    use super::*;

    fn handler(input: &str) -> ExceptionHandler {
        match analyze(input).unwrap() {
            Node::ExceptionHandler(handler) => handler,
            other => panic!("expected exception handler, got {:?}", other),
        }
    }

    #[test]
    fn test_throw() {
        assert_matches!(analyze("(throw e)"), Ok(Node::Exception(_)));
        assert_invalid("(throw)");
        assert_invalid("(throw a b)");
    }

    #[test]
    fn test_try_catch_finally() {
        let handler = handler("(try (f) (g) (catch e (h e)) (finally (cleanup)))");

        assert_eq!(handler.body.expressions.len(), 2);
        assert!(handler.catch.is_some());
        assert!(handler.finally.is_some());
    }

    #[test]
    fn test_try_with_only_finally() {
        let handler = handler("(try (f) (finally (cleanup)))");

        assert!(handler.catch.is_none());
        assert!(handler.finally.is_some());
    }

    #[test]
    fn test_invalid_handlers() {
        assert_invalid("(try (f))");
        assert_invalid("(try (f) (finally 1) (catch e 2))");
        assert_invalid("(try (f) (catch 1 2))");
        assert_invalid("(try (f) (catch e 1) (g))");
    }
}
