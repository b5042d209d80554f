pub mod backend;
pub mod error;
pub mod frontend;
pub mod session;
pub mod source;
pub mod utils;

use backend::Target;
use frontend::reader::form::Form;
use frontend::Frontend;
pub use error::Error;
use session::Session;
use source::{Source, StringSource};

pub type Result<T> = std::result::Result<T, Error>;

/// Text emitted after every compiled top-level form.
pub const UNIT_TERMINATOR: &str = ";\n";

/// Compiles programs for one target.
///
/// Each top-level form is read, expanded, analyzed and emitted on its own.
/// Macros defined by earlier forms are available to later ones, also across
/// calls, as long as the same `Compiler` is used.
#[derive(Debug)]
pub struct Compiler {
    session: Session,
    frontend: Frontend,
}

impl Compiler {
    pub fn new(target: Target) -> Self {
        Self::with_session(Session::new(target))
    }

    pub fn with_session(session: Session) -> Self {
        Compiler {
            session,
            frontend: Frontend::new(),
        }
    }

    pub fn target(&self) -> Target {
        self.session.target()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Compile a single form. Macro definitions compile to the empty string.
    pub fn compile_form(&mut self, form: &Form) -> Result<String> {
        log::trace!("compiling {}", form);

        let node = self.frontend.analyze(&mut self.session, form)?;
        Ok(self.session.target().generate(&node)?)
    }

    /// Compile forms in order, terminating each non-empty unit.
    ///
    /// The first failing form aborts compilation.
    pub fn compile_forms(&mut self, forms: &[Form]) -> Result<String> {
        let mut output = String::new();

        for form in forms {
            let unit = self.compile_form(form)?;
            if !unit.is_empty() {
                output.push_str(&unit);
                output.push_str(UNIT_TERMINATOR);
            }
        }

        Ok(output)
    }

    pub fn compile_source<T: Source>(&mut self, source: &mut T) -> Result<String> {
        log::debug!("compiling {} to {}", source.origin(), self.target());

        let forms = self.frontend.read(source)?;
        self.compile_forms(&forms)
    }

    pub fn compile_str(&mut self, input: &str) -> Result<String> {
        let mut source = StringSource::named(input, "compile_str");
        self.compile_source(&mut source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_are_terminated() {
        let mut compiler = Compiler::new(Target::JavaScript);

        assert_eq!(
            compiler.compile_str("(def x 1) (def y 2)").unwrap(),
            "var x=1;\nvar y=2;\n"
        );
    }

    #[test]
    fn test_macro_definitions_emit_nothing() {
        let mut compiler = Compiler::new(Target::JavaScript);

        assert_eq!(
            compiler
                .compile_str("(defmacro id [x] x) (id 1)")
                .unwrap(),
            "1;\n"
        );
    }

    #[test]
    fn test_macros_survive_between_calls() {
        let mut compiler = Compiler::new(Target::Ruby);
        compiler
            .compile_str("(defmacro unless [test body] (list 'if test nil body))")
            .unwrap();

        assert_eq!(
            compiler.compile_str("(unless ready :wait)").unwrap(),
            "(if ready then nil else :wait end);\n"
        );
    }

    #[test]
    fn test_first_failure_aborts() {
        let mut compiler = Compiler::new(Target::Ruby);

        assert_matches!(
            compiler.compile_str("(def x 1) (loop [i 0] i)"),
            Err(Error::BackendError(_))
        );
    }

    #[test]
    fn test_incomplete_input() {
        let mut compiler = Compiler::new(Target::JavaScript);

        let error = compiler.compile_str("(def x").unwrap_err();
        assert!(error.is_incomplete_input());
    }
}
