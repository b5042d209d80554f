use super::backend::Target;
use super::frontend;
use super::frontend::expander::{Macro, MacroEvaluator, MacroRegistry};
use super::frontend::syntax::intern::InternTable;
use super::frontend::syntax::MacroDefinition;
use super::utils::mangle::Mangler;
use crate::vm::MacroInterpreter;
use std::fmt;

/// State that lives as long as one compilation: the target, interned literals
/// and every macro defined so far.
///
/// Sessions are independent of each other. Nothing is shared between them.
pub struct Session {
    target: Target,
    interned: InternTable,
    macros: MacroRegistry,
    evaluator: Box<dyn MacroEvaluator>,
}

impl Session {
    pub fn new(target: Target) -> Self {
        Self::with_evaluator(target, Box::new(MacroInterpreter::new(target.mangler())))
    }

    pub fn with_evaluator(target: Target, evaluator: Box<dyn MacroEvaluator>) -> Self {
        Self {
            target,
            interned: InternTable::default(),
            macros: MacroRegistry::default(),
            evaluator,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn mangler(&self) -> &'static Mangler {
        self.target.mangler()
    }

    pub fn interned(&mut self) -> &mut InternTable {
        &mut self.interned
    }

    pub fn macros(&self) -> &MacroRegistry {
        &self.macros
    }

    /// Compile the macro function to target text, load it through the
    /// evaluator and register it under its source name.
    pub fn define_macro(&mut self, definition: &MacroDefinition) -> frontend::Result<()> {
        let source = self.target.generate_lambda(&definition.function)?;
        let function = self
            .evaluator
            .evaluate(&definition.name, &source, &definition.function)?;

        self.macros
            .define(Macro::new(definition.name.to_string(), source, function));
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("target", &self.target)
            .field("interned", &self.interned)
            .field("macros", &self.macros)
            .finish()
    }
}
