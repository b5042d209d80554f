use super::{operands, Analyzer, Error};
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::operator::{
    ArithmeticOperator, BinaryOperator, UnaryOperator,
};
use crate::compiler::frontend::syntax::{
    ArithmeticOperation, BinaryOperation, Node, UnaryOperation,
};
use crate::compiler::frontend::Result;

pub fn is_operator(name: &str) -> bool {
    BinaryOperator::lookup(name).is_some()
        || UnaryOperator::lookup(name).is_some()
        || ArithmeticOperator::lookup(name).is_some()
}

pub fn analyze(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    let name = form.head_symbol().unwrap_or_default();
    let operands = operands(form);

    if BinaryOperator::lookup(name).is_some() {
        analyze_binary(analyzer, name, operands, form)
    } else if UnaryOperator::lookup(name).is_some() {
        analyze_unary(analyzer, name, operands, form)
    } else {
        analyze_arithmetic(analyzer, name, operands, form)
    }
}

fn analyze_binary(analyzer: &mut Analyzer, name: &str, operands: &[Form], form: &Form) -> Result<Node> {
    let operator =
        BinaryOperator::lookup(name).ok_or_else(|| Error::unknown_operator(name, form))?;

    match operands {
        [left, right] => Ok(Node::BinaryOperator(BinaryOperation {
            operator,
            left: Box::new(analyzer.analyze(left)?),
            right: Box::new(analyzer.analyze(right)?),
        })),
        _ => Err(Error::arity_mismatch(name, 2, operands.len(), form).into()),
    }
}

fn analyze_unary(analyzer: &mut Analyzer, name: &str, operands: &[Form], form: &Form) -> Result<Node> {
    let operator = UnaryOperator::lookup(name).ok_or_else(|| Error::unknown_operator(name, form))?;

    match operands {
        [operand] => Ok(Node::UnaryOperator(UnaryOperation {
            operator,
            operand: Box::new(analyzer.analyze(operand)?),
        })),
        _ => Err(Error::arity_mismatch(name, 1, operands.len(), form).into()),
    }
}

fn analyze_arithmetic(
    analyzer: &mut Analyzer,
    name: &str,
    operands: &[Form],
    form: &Form,
) -> Result<Node> {
    let operator =
        ArithmeticOperator::lookup(name).ok_or_else(|| Error::unknown_operator(name, form))?;

    Ok(Node::ArithmeticOperator(ArithmeticOperation {
        operator,
        args: analyzer.analyze_all(operands)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::super::tests::analyze;
    use super::*;
    use crate::compiler::backend::Target;
    use crate::compiler::frontend::error::Error as FrontendError;
    use crate::compiler::frontend::reader::tests::read_one;
    use crate::compiler::session::Session;

    #[test]
    fn test_binary_operator() {
        match analyze("(< a 2)").unwrap() {
            Node::BinaryOperator(op) => assert_eq!(op.operator, BinaryOperator::LessThan),
            other => panic!("expected binary operator, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_operator_arity() {
        for input in &["(< 1)", "(< 1 2 3)", "(= 1)"] {
            assert_matches!(
                analyze(input),
                Err(FrontendError::AnalysisError(Error::ArityMismatch { expected: 2, .. }))
            );
        }
    }

    #[test]
    fn test_unary_operator() {
        assert_matches!(analyze("(not x)"), Ok(Node::UnaryOperator(_)));
        assert_matches!(
            analyze("(not x y)"),
            Err(FrontendError::AnalysisError(Error::ArityMismatch { expected: 1, got: 2, .. }))
        );
    }

    #[test]
    fn test_arithmetic_accepts_any_arity() {
        for input in &["(+)", "(+ 1)", "(* 1 2 3 4)"] {
            assert_matches!(analyze(input), Ok(Node::ArithmeticOperator(_)));
        }
    }

    #[test]
    fn test_unknown_operator() {
        let mut session = Session::new(Target::JavaScript);
        let form = read_one("(<=> 1 2)");
        let mut analyzer = Analyzer::new(&mut session);

        assert_matches!(
            analyze_binary(&mut analyzer, "<=>", operands(&form), &form),
            Err(FrontendError::AnalysisError(Error::UnknownOperator { .. }))
        );
    }
}
