use super::literal::{self, Mode};
use super::{Analyzer, Error};
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::Node;
use crate::compiler::frontend::Result;

/// Analyze a quotation
///
/// ```grammar
/// <quotation> -> (quote <form>) | '<form>
/// ```
pub fn analyze(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    match form.list_slice() {
        Some([_, quoted]) => literal::analyze(analyzer, quoted, Mode::Quoted),
        _ => Error::reject("expected (quote <form>)", form),
    }
}
