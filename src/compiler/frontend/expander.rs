// Macro expansion
//
// Macros are user defined functions from forms to forms. They are defined with
// `defmacro`, compiled by the regular analyzer and code generator, and then
// handed to a `MacroEvaluator`, which turns the compiled function into
// something we can call at compile time.
//
// Expansion happens before a list form is analyzed: as long as the head of the
// form names a registered macro, the macro is applied to the remaining
// elements and the result replaces the form. There is no bound on the number
// of rounds, so a macro that always expands to a use of itself never returns.

use super::reader::form::Form;
use super::syntax::name::QualifiedName;
use super::syntax::Lambda;
use crate::vm;
use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("failed to expand macro {name}: {source}")]
    InvocationError { name: String, source: vm::error::Error },

    #[error("macro {name} returned a value that is not a form: {message}")]
    InvalidExpansion { name: String, message: String },

    #[error("failed to load macro {name}: {message}")]
    EvaluationError { name: String, message: String },
}

impl Error {
    pub fn invocation<N: Into<String>>(name: N, source: vm::error::Error) -> Self {
        Error::InvocationError {
            name: name.into(),
            source,
        }
    }

    pub fn invalid_expansion<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        Error::InvalidExpansion {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn evaluation<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        Error::EvaluationError {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// A callable macro: form arguments in, one form out.
pub trait MacroFunction {
    fn call(&self, arguments: &[Form]) -> Result<Form>;
}

impl<F> MacroFunction for F
where
    F: Fn(&[Form]) -> Result<Form>,
{
    fn call(&self, arguments: &[Form]) -> Result<Form> {
        self(arguments)
    }
}

/// Turns the generated text of a macro function into something callable.
///
/// The analyzed lambda is passed alongside the text so evaluators that don't
/// execute target code can still run the macro.
pub trait MacroEvaluator {
    fn evaluate(
        &mut self,
        name: &QualifiedName,
        source: &str,
        function: &Lambda,
    ) -> Result<Rc<dyn MacroFunction>>;
}

pub struct Macro {
    name: String,
    source: String,
    function: Rc<dyn MacroFunction>,
}

impl Macro {
    pub fn new<N: Into<String>, S: Into<String>>(
        name: N,
        source: S,
        function: Rc<dyn MacroFunction>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            function,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The target text the macro function was compiled to.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn call(&self, arguments: &[Form]) -> Result<Form> {
        self.function.call(arguments)
    }
}

impl fmt::Debug for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Macro")
            .field("name", &self.name)
            .field("source", &self.source)
            .finish()
    }
}

/// Macros by the raw, unmangled name they are used with.
///
/// Registering a name twice replaces the earlier macro.
#[derive(Debug, Default)]
pub struct MacroRegistry {
    macros: FxHashMap<String, Rc<Macro>>,
}

impl MacroRegistry {
    pub fn define(&mut self, mac: Macro) {
        log::debug!("defining macro {}", mac.name());
        self.macros.insert(mac.name().to_string(), Rc::new(mac));
    }

    pub fn get(&self, name: &str) -> Option<Rc<Macro>> {
        self.macros.get(name).cloned()
    }

    pub fn is_macro(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.macros.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

pub struct Expander<'a> {
    registry: &'a MacroRegistry,
}

impl<'a> Expander<'a> {
    pub fn new(registry: &'a MacroRegistry) -> Self {
        Self { registry }
    }

    /// Expand `form` until its head no longer names a macro.
    ///
    /// Forms that aren't macro uses come back unchanged.
    pub fn expand(&self, form: &Form) -> Result<Form> {
        Ok(self
            .expand_macro_use(form)?
            .unwrap_or_else(|| form.clone()))
    }

    /// Like `expand`, but returns `None` when `form` isn't a macro use.
    pub fn expand_macro_use(&self, form: &Form) -> Result<Option<Form>> {
        let mut current = match self.expand_once(form)? {
            Some(expanded) => expanded,
            None => return Ok(None),
        };

        while let Some(expanded) = self.expand_once(&current)? {
            current = expanded;
        }

        Ok(Some(current))
    }

    pub fn expand_once(&self, form: &Form) -> Result<Option<Form>> {
        match form.list_slice() {
            Some([Form::Symbol(head), arguments @ ..]) => match self.registry.get(head) {
                Some(mac) => {
                    let expansion = mac.call(arguments)?;
                    log::trace!("expanded {} to {}", form, expansion);
                    Ok(Some(expansion))
                }
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }
}
