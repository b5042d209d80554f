use super::value::Value;
use crate::compiler::frontend::syntax::Variable;
use im_rc::HashMap;

/// Local bindings.
///
/// The map is persistent, so closures capture their environment by cloning
/// it and later bindings never leak into an environment captured earlier.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<Variable, Value>,
}

impl Environment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: &Variable) -> Option<&Value> {
        self.bindings.get(variable)
    }

    pub fn set(&mut self, variable: Variable, value: Value) -> &mut Self {
        self.bindings.insert(variable, value);
        self
    }

    /// A new environment with `variable` bound to `value`.
    pub fn extend(&self, variable: Variable, value: Value) -> Self {
        Self {
            bindings: self.bindings.update(variable, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Variable {
        Variable::new(None, name)
    }

    #[test]
    fn test_get_empty() {
        let env = Environment::empty();

        assert_eq!(env.get(&var("test")), None)
    }

    #[test]
    fn test_set_then_get() {
        let mut env = Environment::empty();
        env.set(var("test"), Value::Integer(10));

        assert_eq!(env.get(&var("test")), Some(&Value::Integer(10)));
    }

    #[test]
    fn test_extend_leaves_original_untouched() {
        let mut outer = Environment::empty();
        outer.set(var("test"), Value::Integer(10));

        let inner = outer.extend(var("test"), Value::Integer(12));

        assert_eq!(inner.get(&var("test")), Some(&Value::Integer(12)));
        assert_eq!(outer.get(&var("test")), Some(&Value::Integer(10)));
    }

    #[test]
    fn test_namespaces_are_distinct_bindings() {
        let mut env = Environment::empty();
        env.set(var("x"), Value::Integer(1));

        assert_eq!(env.get(&Variable::new(Some("ns".into()), "x")), None);
    }
}
