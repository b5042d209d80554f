use super::Analyzer;
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::name::QualifiedName;
use crate::compiler::frontend::syntax::Node;
use crate::compiler::frontend::Result;

/// Whether symbols and lists denote code or data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Code,
    Quoted,
}

/// Convert a form that isn't a special form to a node.
///
/// In code mode symbols become variables and collection elements are analyzed
/// as code. In quoted mode symbols become symbol literals and lists become list
/// literals, recursively.
pub fn analyze(analyzer: &mut Analyzer, form: &Form, mode: Mode) -> Result<Node> {
    let node = match form {
        Form::Nil => analyzer.nil(),
        Form::Boolean(b) => Node::Boolean(analyzer.session().interned().boolean(*b)),
        Form::Integer(i) => Node::Integer(analyzer.session().interned().integer(*i)),
        Form::String(s) => Node::String(analyzer.session().interned().string(s.as_str())),
        Form::Keyword(k) => {
            Node::Keyword(analyzer.session().interned().keyword(QualifiedName::parse(k)))
        }
        Form::Rational(n, d) => Node::Rational(*n, *d),
        Form::Decimal(d) => Node::Decimal(*d),
        Form::Symbol(s) => match mode {
            Mode::Code => Node::Variable(analyzer.variable(s)),
            Mode::Quoted => {
                Node::Symbol(analyzer.session().interned().symbol(QualifiedName::parse(s)))
            }
        },
        Form::List(elements) => match mode {
            Mode::Code => analyzer.analyze(form)?,
            Mode::Quoted => Node::List(elements_of(analyzer, elements, mode)?),
        },
        Form::Vector(elements) => Node::Vector(elements_of(analyzer, elements, mode)?),
        Form::Set(elements) => Node::Set(elements_of(analyzer, elements, mode)?),
        Form::Map(pairs) => {
            let mut entries = Vec::with_capacity(pairs.len());
            for (key, value) in pairs {
                entries.push((element(analyzer, key, mode)?, element(analyzer, value, mode)?));
            }
            Node::Map(entries)
        }
    };

    Ok(node)
}

fn element(analyzer: &mut Analyzer, form: &Form, mode: Mode) -> Result<Node> {
    match mode {
        Mode::Code => analyzer.analyze(form),
        Mode::Quoted => analyze(analyzer, form, mode),
    }
}

fn elements_of(analyzer: &mut Analyzer, forms: &[Form], mode: Mode) -> Result<Vec<Node>> {
    forms.iter().map(|f| element(analyzer, f, mode)).collect()
}
