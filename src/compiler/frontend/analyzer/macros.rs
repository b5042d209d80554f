use super::lambda::analyze_lambda;
use super::{Analyzer, Error};
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::name::QualifiedName;
use crate::compiler::frontend::syntax::{MacroDefinition, Node};
use crate::compiler::frontend::Result;

/// Analyze a macro definition and register the macro with the session
///
/// ```grammar
/// <defmacro> -> (defmacro <name> [<param>*] <body>)
///             | (defmacro <name> ([<param>*] <body>) ...)
/// ```
///
/// The macro is usable by every form analyzed after this one.
pub fn analyze(analyzer: &mut Analyzer, form: &Form) -> Result<Node> {
    match form.list_slice() {
        Some([_, Form::Symbol(name), definition @ ..]) if !definition.is_empty() => {
            let function = analyze_lambda(analyzer, form, definition)?;
            let definition = MacroDefinition {
                name: QualifiedName::parse(name),
                function,
            };

            analyzer.session().define_macro(&definition)?;
            Ok(Node::MacroDefinition(definition))
        }
        _ => Error::reject("expected (defmacro <name> [<param>*] <body>)", form),
    }
}
