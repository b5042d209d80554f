pub mod conditional;
pub mod definition;
pub mod error;
pub mod exception;
pub mod interop;
pub mod lambda;
pub mod literal;
pub mod macros;
pub mod operator;
pub mod quotation;
pub mod recursion;
pub mod types;

use super::expander::Expander;
use super::reader::form::Form;
use super::syntax::name::QualifiedName;
use super::syntax::{Application, Block, Node, Variable};
use super::Result;
use crate::compiler::session::Session;
pub use error::Error;
use literal::Mode;

/// Heads of the forms analysis treats specially.
pub const SPECIAL_FORMS: &[&str] = &[
    "def",
    "quote",
    "cond",
    "if",
    "fn",
    "do",
    "loop",
    "recur",
    "throw",
    "try",
    "new",
    ".",
    ".-",
    "set!",
    "defmacro",
    "deftype",
    "defprotocol",
];

/// Turns forms into nodes.
///
/// Analysis needs the session for three things: interning literals, mangling
/// names for the session's target and expanding and defining macros.
pub struct Analyzer<'s> {
    session: &'s mut Session,
}

impl<'s> Analyzer<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        Self { session }
    }

    pub fn session(&mut self) -> &mut Session {
        &mut *self.session
    }

    pub fn analyze(&mut self, form: &Form) -> Result<Node> {
        let expansion = Expander::new(self.session.macros()).expand_macro_use(form)?;
        if let Some(expanded) = expansion {
            return self.analyze(&expanded);
        }

        match form {
            Form::List(elements) => self.analyze_list(form, elements),
            other => literal::analyze(self, other, Mode::Code),
        }
    }

    fn analyze_list(&mut self, form: &Form, elements: &[Form]) -> Result<Node> {
        let head = match elements.first() {
            Some(head) => head,
            None => return Ok(Node::List(vec![])),
        };

        log::trace!("analyzing {}", form);

        match head.as_symbol() {
            Some("def") => definition::analyze(self, form),
            Some("quote") => quotation::analyze(self, form),
            Some("cond") => conditional::analyze_cond(self, form),
            Some("if") => conditional::analyze_if(self, form),
            Some("fn") => lambda::analyze(self, form),
            Some("do") => Ok(Node::Block(self.analyze_block(operands(form))?)),
            Some("loop") => recursion::analyze_loop(self, form),
            Some("recur") => recursion::analyze_recur(self, form),
            Some("throw") => exception::analyze_throw(self, form),
            Some("try") => exception::analyze_try(self, form),
            Some("new") => interop::analyze_new(self, form),
            Some(".") => interop::analyze_method(self, form),
            Some(".-") => interop::analyze_property(self, form),
            Some("set!") => interop::analyze_assignment(self, form),
            Some("defmacro") => macros::analyze(self, form),
            Some("deftype") => types::analyze_type(self, form),
            Some("defprotocol") => types::analyze_protocol(self, form),
            Some(name) if operator::is_operator(name) => operator::analyze(self, form),
            _ => self.analyze_application(head, operands(form)),
        }
    }

    fn analyze_application(&mut self, head: &Form, operands: &[Form]) -> Result<Node> {
        Ok(Node::Application(Application {
            invocable: Box::new(self.analyze(head)?),
            args: self.analyze_all(operands)?,
            tail: false,
        }))
    }

    pub fn analyze_all(&mut self, forms: &[Form]) -> Result<Vec<Node>> {
        forms.iter().map(|f| self.analyze(f)).collect()
    }

    pub fn analyze_block(&mut self, forms: &[Form]) -> Result<Block> {
        Ok(Block::new(self.analyze_all(forms)?))
    }

    /// A function body: like a block, but its value is in tail position.
    pub fn analyze_body(&mut self, forms: &[Form]) -> Result<Block> {
        let mut expressions = self.analyze_all(forms)?;
        if let Some(last) = expressions.pop() {
            expressions.push(last.in_tail_position());
        }
        Ok(Block::new(expressions))
    }

    pub fn variable(&self, name: &str) -> Variable {
        Variable::mangled(&QualifiedName::parse(name), self.session.mangler())
    }

    pub fn nil(&mut self) -> Node {
        Node::Nil(self.session.interned().nil())
    }
}

/// Everything but the head of a list form.
pub fn operands(form: &Form) -> &[Form] {
    match form.list_slice() {
        Some([_, operands @ ..]) => operands,
        _ => &[],
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::compiler::backend::Target;
    use crate::compiler::frontend::error::Error as FrontendError;
    use crate::compiler::frontend::reader::tests::read_one;

    pub fn analyze_with(session: &mut Session, input: &str) -> Result<Node> {
        Analyzer::new(session).analyze(&read_one(input))
    }

    pub fn analyze(input: &str) -> Result<Node> {
        let mut session = Session::new(Target::JavaScript);
        analyze_with(&mut session, input)
    }

    pub fn assert_invalid(input: &str) {
        assert_matches!(
            analyze(input),
            Err(FrontendError::AnalysisError(Error::InvalidForm { .. }))
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(analyze("()").unwrap(), Node::List(vec![]));
    }

    #[test]
    fn test_application() {
        match analyze("(f 1 x)").unwrap() {
            Node::Application(app) => {
                assert_eq!(*app.invocable, Node::Variable(Variable::new(None, "f")));
                assert_eq!(app.args.len(), 2);
                assert!(!app.tail);
            }
            other => panic!("expected application, got {:?}", other),
        }
    }

    #[test]
    fn test_application_of_expression() {
        assert_matches!(analyze("((fn [] f) 1)"), Ok(Node::Application(_)));
    }

    #[test]
    fn test_do_block() {
        match analyze("(do 1 2 3)").unwrap() {
            Node::Block(block) => assert_eq!(block.expressions.len(), 3),
            other => panic!("expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_variables_are_mangled() {
        assert_eq!(
            analyze("ws.core/list?").unwrap(),
            Node::Variable(Variable::new(Some("ws.core".to_string()), "list__QEST__"))
        );
        assert_eq!(
            analyze("default").unwrap(),
            Node::Variable(Variable::new(None, "__DEFAULT__"))
        );
    }

    #[test]
    fn test_literals_are_interned_per_session() {
        let mut session = Session::new(Target::JavaScript);
        let first = analyze_with(&mut session, ":foo").unwrap();
        let second = analyze_with(&mut session, ":foo").unwrap();

        match (first, second) {
            (Node::Keyword(a), Node::Keyword(b)) => assert!(a.is_identical(&b)),
            other => panic!("expected keywords, got {:?}", other),
        }
    }
}
