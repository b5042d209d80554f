pub mod core;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod procedure;
pub mod value;

use crate::compiler::frontend::expander::{self, MacroEvaluator, MacroFunction};
use crate::compiler::frontend::reader::form::Form;
use crate::compiler::frontend::syntax::name::QualifiedName;
use crate::compiler::frontend::syntax::Lambda;
use crate::compiler::utils::mangle::Mangler;
use environment::Environment;
pub use interpreter::Interpreter;
use std::cell::RefCell;
use std::rc::Rc;
use value::Value;

/// Runs macros at compile time with the built-in interpreter.
///
/// All macros loaded through one `MacroInterpreter` share a single
/// interpreter, so definitions made by one macro body and the gensym counter
/// are visible to the others.
pub struct MacroInterpreter {
    interpreter: Rc<RefCell<Interpreter>>,
}

impl MacroInterpreter {
    pub fn new(mangler: &Mangler) -> Self {
        Self {
            interpreter: Rc::new(RefCell::new(Interpreter::new(mangler))),
        }
    }
}

impl MacroEvaluator for MacroInterpreter {
    fn evaluate(
        &mut self,
        name: &QualifiedName,
        source: &str,
        function: &Lambda,
    ) -> expander::Result<Rc<dyn MacroFunction>> {
        log::debug!("loading macro {}: {}", name, source);

        if let Some(construct) = interpreter::unsupported_construct(function) {
            return Err(expander::Error::evaluation(
                name.to_string(),
                error::Error::Unsupported(construct).to_string(),
            ));
        }

        let procedure = self
            .interpreter
            .borrow()
            .closure(Rc::new(function.clone()), &Environment::empty());

        Ok(Rc::new(CompiledMacro {
            name: name.to_string(),
            procedure,
            interpreter: self.interpreter.clone(),
        }))
    }
}

/// A macro function loaded into the interpreter.
pub struct CompiledMacro {
    name: String,
    procedure: Value,
    interpreter: Rc<RefCell<Interpreter>>,
}

impl MacroFunction for CompiledMacro {
    fn call(&self, arguments: &[Form]) -> expander::Result<Form> {
        let arguments = arguments.iter().map(Value::from_form).collect();
        let expansion = self
            .interpreter
            .borrow_mut()
            .apply(&self.procedure, arguments)
            .map_err(|e| expander::Error::invocation(self.name.clone(), e))?;

        expansion
            .to_form()
            .map_err(|e| expander::Error::invalid_expansion(self.name.clone(), e.to_string()))
    }
}
