use super::core;
use super::environment::Environment;
use super::error::{self, Error, Result};
use super::procedure::{Closure, Procedure};
use super::value::Value;
use crate::compiler::frontend::syntax::operator::{
    ArithmeticOperator, BinaryOperator, UnaryOperator,
};
use crate::compiler::frontend::syntax::{
    ArithmeticOperation, BinaryOperation, Block, Conditional, ExceptionHandler, Lambda, Loop,
    Node, NodeKind, Params, UnaryOperation, Variable,
};
use crate::compiler::utils::mangle::Mangler;
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// What evaluating a node in tail position produced.
///
/// `recur` is not an error: it hands the new bindings to the closest loop or
/// function body, which rebinds and evaluates its body again.
#[derive(Debug)]
enum Flow {
    Return(Value),
    Recur(Vec<Value>),
}

/// Tree walking evaluator for analyzed programs.
///
/// It covers what macro bodies need: literals, variables, functions,
/// conditionals, blocks, operators, `def`, `loop`/`recur` and
/// `throw`/`try`. Host interop and type definitions have no meaning at
/// compile time and fail with `Unsupported`.
pub struct Interpreter {
    globals: FxHashMap<Variable, Value>,
    gensym_counter: usize,
}

impl Interpreter {
    /// An interpreter with the core library bound under the names `mangler`
    /// produces for them.
    pub fn new(mangler: &Mangler) -> Self {
        let mut interpreter = Self::bare();
        core::register(&mut interpreter, mangler);
        interpreter
    }

    pub fn bare() -> Self {
        Self {
            globals: FxHashMap::default(),
            gensym_counter: 0,
        }
    }

    pub fn define(&mut self, variable: Variable, value: Value) {
        log::trace!("defining {}", variable);
        self.globals.insert(variable, value);
    }

    pub fn lookup(&self, variable: &Variable, env: &Environment) -> Result<Value> {
        env.get(variable)
            .or_else(|| self.globals.get(variable))
            .cloned()
            .ok_or_else(|| Error::UnboundVariable(variable.to_string()))
    }

    /// A fresh symbol name, unique for this interpreter.
    pub fn gensym(&mut self, prefix: &str) -> String {
        self.gensym_counter += 1;
        format!("{}{}", prefix, self.gensym_counter)
    }

    pub fn closure(&self, lambda: Rc<Lambda>, env: &Environment) -> Value {
        Value::Procedure(Rc::new(Procedure::closure(lambda, env.clone())))
    }

    pub fn eval(&mut self, node: &Node, env: &Environment) -> Result<Value> {
        match self.eval_tail(node, env)? {
            Flow::Return(value) => Ok(value),
            Flow::Recur(_) => Err(Error::RecurOutsideLoop),
        }
    }

    fn eval_all(&mut self, nodes: &[Node], env: &Environment) -> Result<Vec<Value>> {
        nodes.iter().map(|node| self.eval(node, env)).collect()
    }

    fn eval_tail(&mut self, node: &Node, env: &Environment) -> Result<Flow> {
        match node {
            Node::RecursionPoint(recursion) => {
                Ok(Flow::Recur(self.eval_all(&recursion.args, env)?))
            }
            Node::Conditional(conditional) => self.eval_conditional(conditional, env),
            Node::Block(block) => self.eval_block(block, env),
            Node::ExceptionHandler(handler) => self.eval_handler(handler, env),
            other => self.eval_expression(other, env).map(Flow::Return),
        }
    }

    fn eval_expression(&mut self, node: &Node, env: &Environment) -> Result<Value> {
        match node {
            Node::Nil(_) => Ok(Value::Nil),
            Node::Boolean(b) => Ok(Value::Boolean(**b)),
            Node::Integer(i) => Ok(Value::Integer(**i)),
            Node::Rational(n, d) => Ok(Value::Rational(*n, *d)),
            Node::Decimal(d) => Ok(Value::Decimal(*d)),
            Node::String(s) => Ok(Value::String((**s).clone())),
            Node::Keyword(k) => Ok(Value::Keyword(k.name().to_string())),
            Node::Symbol(s) => Ok(Value::Symbol(s.name().to_string())),
            Node::List(elements) => Ok(Value::list(self.eval_all(elements, env)?)),
            Node::Vector(elements) => Ok(Value::vector(self.eval_all(elements, env)?)),
            Node::Set(elements) => Ok(Value::set(self.eval_all(elements, env)?)),
            Node::Map(entries) => {
                let mut pairs = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    pairs.push((self.eval(key, env)?, self.eval(value, env)?));
                }
                Ok(Value::map(pairs))
            }
            Node::Variable(variable) => self.lookup(variable, env),
            Node::Definition(definition) => {
                let value = self.eval(&definition.value, env)?;
                self.define(definition.name.clone(), value.clone());
                Ok(value)
            }
            Node::Lambda(lambda) => Ok(self.closure(Rc::new(lambda.clone()), env)),
            Node::Loop(lp) => self.eval_loop(lp, env),
            Node::Exception(exception) => {
                Err(Error::Thrown(self.eval(&exception.expression, env)?))
            }
            Node::ExceptionHandler(handler) => match self.eval_handler(handler, env)? {
                Flow::Return(value) => Ok(value),
                Flow::Recur(_) => Err(Error::RecurOutsideLoop),
            },
            Node::Application(application) => {
                let callee = self.eval(&application.invocable, env)?;
                let args = self.eval_all(&application.args, env)?;
                self.apply(&callee, args)
            }
            Node::BinaryOperator(op) => self.eval_binary(op, env),
            Node::UnaryOperator(op) => self.eval_unary(op, env),
            Node::ArithmeticOperator(op) => self.eval_arithmetic(op, env),
            Node::RecursionPoint(_) | Node::Conditional(_) | Node::Block(_) => self.eval(node, env),
            Node::ClassInstantiation(_)
            | Node::MethodResolution(_)
            | Node::PropertyResolution(_)
            | Node::Assignment(_)
            | Node::MacroDefinition(_)
            | Node::TypeDefinition(_)
            | Node::ProtocolDefinition(_) => Err(Error::Unsupported(node.kind())),
        }
    }

    fn eval_block(&mut self, block: &Block, env: &Environment) -> Result<Flow> {
        for effect in block.effects() {
            self.eval(effect, env)?;
        }

        match block.result() {
            Some(result) => self.eval_tail(result, env),
            None => Ok(Flow::Return(Value::Nil)),
        }
    }

    fn eval_conditional(&mut self, conditional: &Conditional, env: &Environment) -> Result<Flow> {
        for (test, consequent) in &conditional.branches {
            if self.eval(test, env)?.is_truthy() {
                return self.eval_tail(consequent, env);
            }
        }
        self.eval_tail(&conditional.default, env)
    }

    /// Bindings are sequential, each one sees the ones before it.
    fn eval_loop(&mut self, lp: &Loop, env: &Environment) -> Result<Value> {
        let mut scope = env.clone();
        for (variable, init) in &lp.bindings {
            let value = self.eval(init, &scope)?;
            scope.set(variable.clone(), value);
        }

        loop {
            match self.eval_block(&lp.body, &scope)? {
                Flow::Return(value) => return Ok(value),
                Flow::Recur(values) => {
                    if values.len() != lp.bindings.len() {
                        return Err(error::arity_mismatch(
                            "recur",
                            lp.bindings.len().to_string(),
                            values.len(),
                        ));
                    }
                    for ((variable, _), value) in lp.bindings.iter().zip(values) {
                        scope.set(variable.clone(), value);
                    }
                }
            }
        }
    }

    /// The catch clause sees the thrown value, or the message of any other
    /// error. `recur` passes through the handler untouched. `finally` always
    /// runs.
    fn eval_handler(&mut self, handler: &ExceptionHandler, env: &Environment) -> Result<Flow> {
        let mut result = self.eval_block(&handler.body, env);

        let caught = match &result {
            Err(Error::RecurOutsideLoop) | Ok(_) => None,
            Err(Error::Thrown(value)) => Some(value.clone()),
            Err(other) => Some(Value::String(other.to_string())),
        };

        if let (Some(caught), Some(catch)) = (caught, &handler.catch) {
            let scope = env.extend(catch.binding.clone(), caught);
            result = self.eval_block(&catch.body, &scope);
        }

        if let Some(finally) = &handler.finally {
            self.eval_value(finally, env)?;
        }

        result
    }

    fn eval_value(&mut self, block: &Block, env: &Environment) -> Result<Value> {
        match self.eval_block(block, env)? {
            Flow::Return(value) => Ok(value),
            Flow::Recur(_) => Err(Error::RecurOutsideLoop),
        }
    }

    pub fn apply(&mut self, callee: &Value, args: Vec<Value>) -> Result<Value> {
        match callee {
            Value::Procedure(procedure) => match &**procedure {
                Procedure::Foreign(foreign) => {
                    if !foreign.arity.accepts(args.len()) {
                        return Err(error::arity_mismatch(
                            foreign.name,
                            foreign.arity.to_string(),
                            args.len(),
                        ));
                    }
                    foreign.call(self, args)
                }
                Procedure::Closure(closure) => self.apply_closure(closure, args),
            },
            other => Err(Error::NotCallable(other.to_string())),
        }
    }

    /// A function body is a recursion point: `recur` in tail position
    /// re-enters the clause matching the new argument count.
    fn apply_closure(&mut self, closure: &Closure, mut args: Vec<Value>) -> Result<Value> {
        loop {
            let clause = closure.lambda.clause_for(args.len()).ok_or_else(|| {
                error::arity_mismatch("fn", closure.arity_description(), args.len())
            })?;
            let env = bind_params(&closure.env, &clause.params, args);

            match self.eval_block(&clause.body, &env)? {
                Flow::Return(value) => return Ok(value),
                Flow::Recur(next) => args = next,
            }
        }
    }

    fn eval_binary(&mut self, op: &BinaryOperation, env: &Environment) -> Result<Value> {
        let left = self.eval(&op.left, env)?;

        match op.operator {
            BinaryOperator::And if !left.is_truthy() => return Ok(left),
            BinaryOperator::Or if left.is_truthy() => return Ok(left),
            BinaryOperator::And | BinaryOperator::Or => return self.eval(&op.right, env),
            BinaryOperator::InstanceOf => {
                return Err(Error::UnsupportedOperator(op.operator.source_name()))
            }
            _ => (),
        }

        let right = self.eval(&op.right, env)?;

        match op.operator {
            BinaryOperator::Equal => Ok(Value::Boolean(left == right)),
            BinaryOperator::NotEqual => Ok(Value::Boolean(left != right)),
            BinaryOperator::Identical => Ok(Value::Boolean(left.is_identical(&right))),
            BinaryOperator::LessThan => compare(&left, &right).map(|o| Value::Boolean(o.is_lt())),
            BinaryOperator::LessThanOrEqual => {
                compare(&left, &right).map(|o| Value::Boolean(o.is_le()))
            }
            BinaryOperator::GreaterThan => {
                compare(&left, &right).map(|o| Value::Boolean(o.is_gt()))
            }
            BinaryOperator::GreaterThanOrEqual => {
                compare(&left, &right).map(|o| Value::Boolean(o.is_ge()))
            }
            other => {
                let (l, r) = (integer(&left)?, integer(&right)?);
                let result = match other {
                    BinaryOperator::Modulo => l
                        .checked_rem(r)
                        .ok_or_else(|| error::arithmetic_error("division by zero"))?,
                    BinaryOperator::BitAnd => l & r,
                    BinaryOperator::BitOr => l | r,
                    BinaryOperator::BitXor => l ^ r,
                    BinaryOperator::BitShiftLeft => l.wrapping_shl(r as u32),
                    BinaryOperator::BitShiftRight => l.wrapping_shr(r as u32),
                    _ => ((l as u64).wrapping_shr(r as u32)) as i64,
                };
                Ok(Value::Integer(result))
            }
        }
    }

    fn eval_unary(&mut self, op: &UnaryOperation, env: &Environment) -> Result<Value> {
        let operand = self.eval(&op.operand, env)?;

        match op.operator {
            UnaryOperator::Not => Ok(Value::Boolean(!operand.is_truthy())),
            UnaryOperator::BitNot => Ok(Value::Integer(!integer(&operand)?)),
        }
    }

    /// Mirrors the emitted code: no operands yield the identity, a single
    /// operand is negated for `-` and returned as is otherwise.
    fn eval_arithmetic(&mut self, op: &ArithmeticOperation, env: &Environment) -> Result<Value> {
        let args = self.eval_all(&op.args, env)?;

        match (op.operator, args.as_slice()) {
            (ArithmeticOperator::Add, []) => Ok(Value::Integer(0)),
            (ArithmeticOperator::Multiply, []) | (ArithmeticOperator::Divide, []) => {
                Ok(Value::Integer(1))
            }
            (ArithmeticOperator::Subtract, []) => Ok(Value::Integer(0)),
            (ArithmeticOperator::Subtract, [operand]) => {
                arithmetic(ArithmeticOperator::Subtract, &Value::Integer(0), operand)
            }
            (_, [operand]) => number(operand).map(|_| operand.clone()),
            (operator, [first, rest @ ..]) => {
                let mut accumulator = number(first)?.clone();
                for operand in rest {
                    accumulator = arithmetic(operator, &accumulator, operand)?;
                }
                Ok(accumulator)
            }
        }
    }
}

fn bind_params(env: &Environment, params: &Params, mut args: Vec<Value>) -> Environment {
    let mut scope = env.clone();
    let rest = args.split_off(params.required().min(args.len()));

    for (param, arg) in params.fixed.iter().zip(args) {
        scope.set(param.clone(), arg);
    }
    if let Some(name) = &params.rest {
        let rest = if rest.is_empty() {
            Value::Nil
        } else {
            Value::list(rest)
        };
        scope.set(name.clone(), rest);
    }

    scope
}

fn number(value: &Value) -> Result<&Value> {
    if value.is_number() {
        Ok(value)
    } else {
        Err(error::wrong_type("a number", value))
    }
}

fn integer(value: &Value) -> Result<i64> {
    match value {
        Value::Integer(i) => Ok(*i),
        other => Err(error::wrong_type("an integer", other)),
    }
}

fn decimal(value: &Value) -> Result<f64> {
    match value {
        Value::Integer(i) => Ok(*i as f64),
        Value::Rational(n, d) => Ok(*n as f64 / *d as f64),
        Value::Decimal(d) => Ok(*d),
        other => Err(error::wrong_type("a number", other)),
    }
}

fn compare(left: &Value, right: &Value) -> Result<std::cmp::Ordering> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(l.cmp(r)),
        (Value::String(l), Value::String(r)) => Ok(l.cmp(r)),
        (l, r) => decimal(l)?
            .partial_cmp(&decimal(r)?)
            .ok_or_else(|| error::arithmetic_error("NaN can't be compared")),
    }
}

/// Integer arithmetic stays exact; everything else is carried out on
/// decimals. Integer division that doesn't divide evenly yields a decimal.
fn arithmetic(operator: ArithmeticOperator, left: &Value, right: &Value) -> Result<Value> {
    if let (Value::Integer(l), Value::Integer(r)) = (left, right) {
        let exact = match operator {
            ArithmeticOperator::Add => l.checked_add(*r),
            ArithmeticOperator::Subtract => l.checked_sub(*r),
            ArithmeticOperator::Multiply => l.checked_mul(*r),
            ArithmeticOperator::Divide if *r == 0 => {
                return Err(error::arithmetic_error("division by zero"))
            }
            ArithmeticOperator::Divide => match l.checked_rem(*r) {
                Some(0) => l.checked_div(*r),
                Some(_) => return Ok(Value::Decimal(*l as f64 / *r as f64)),
                None => None,
            },
        };
        return exact
            .map(Value::Integer)
            .ok_or_else(|| error::arithmetic_error("integer overflow"));
    }

    let (l, r) = (decimal(left)?, decimal(right)?);
    let result = match operator {
        ArithmeticOperator::Add => l + r,
        ArithmeticOperator::Subtract => l - r,
        ArithmeticOperator::Multiply => l * r,
        ArithmeticOperator::Divide => l / r,
    };
    Ok(Value::Decimal(result))
}

/// The first construct in `lambda` the interpreter can't evaluate, if any.
pub fn unsupported_construct(lambda: &Lambda) -> Option<NodeKind> {
    lambda
        .clauses()
        .iter()
        .find_map(|clause| unsupported_in_all(&clause.body.expressions))
}

fn unsupported_in_all(nodes: &[Node]) -> Option<NodeKind> {
    nodes.iter().find_map(unsupported_in)
}

fn unsupported_in(node: &Node) -> Option<NodeKind> {
    match node {
        Node::ClassInstantiation(_)
        | Node::MethodResolution(_)
        | Node::PropertyResolution(_)
        | Node::Assignment(_)
        | Node::MacroDefinition(_)
        | Node::TypeDefinition(_)
        | Node::ProtocolDefinition(_) => Some(node.kind()),
        Node::Nil(_)
        | Node::Boolean(_)
        | Node::Integer(_)
        | Node::Rational(_, _)
        | Node::Decimal(_)
        | Node::String(_)
        | Node::Keyword(_)
        | Node::Symbol(_)
        | Node::Variable(_) => None,
        Node::BinaryOperator(op) if op.operator == BinaryOperator::InstanceOf => {
            Some(node.kind())
        }
        Node::BinaryOperator(op) => unsupported_in(&op.left).or_else(|| unsupported_in(&op.right)),
        Node::UnaryOperator(op) => unsupported_in(&op.operand),
        Node::ArithmeticOperator(op) => unsupported_in_all(&op.args),
        Node::Vector(elements) | Node::Set(elements) | Node::List(elements) => {
            unsupported_in_all(elements)
        }
        Node::Map(entries) => entries
            .iter()
            .find_map(|(k, v)| unsupported_in(k).or_else(|| unsupported_in(v))),
        Node::Definition(definition) => unsupported_in(&definition.value),
        Node::Conditional(conditional) => conditional
            .branches
            .iter()
            .find_map(|(t, c)| unsupported_in(t).or_else(|| unsupported_in(c)))
            .or_else(|| unsupported_in(&conditional.default)),
        Node::Lambda(lambda) => unsupported_construct(lambda),
        Node::Block(block) => unsupported_in_all(&block.expressions),
        Node::Loop(lp) => lp
            .bindings
            .iter()
            .find_map(|(_, init)| unsupported_in(init))
            .or_else(|| unsupported_in_all(&lp.body.expressions)),
        Node::RecursionPoint(recursion) => unsupported_in_all(&recursion.args),
        Node::ExceptionHandler(handler) => unsupported_in_all(&handler.body.expressions)
            .or_else(|| {
                handler
                    .catch
                    .as_ref()
                    .and_then(|c| unsupported_in_all(&c.body.expressions))
            })
            .or_else(|| {
                handler
                    .finally
                    .as_ref()
                    .and_then(|f| unsupported_in_all(&f.expressions))
            }),
        Node::Exception(exception) => unsupported_in(&exception.expression),
        Node::Application(application) => unsupported_in(&application.invocable)
            .or_else(|| unsupported_in_all(&application.args)),
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::compiler::backend::Target;
    use crate::compiler::frontend::reader::tests::read_one;
    use crate::compiler::frontend::Frontend;
    use crate::compiler::session::Session;

    /// Evaluate every input in order with one interpreter, returning the value
    /// of the last one.
    pub fn eval_all(inputs: &[&str]) -> Result<Value> {
        let mut session = Session::new(Target::JavaScript);
        let mut interpreter = Interpreter::new(session.mangler());
        let frontend = Frontend::new();
        let mut last = Value::Nil;

        for input in inputs {
            let node = frontend.analyze(&mut session, &read_one(input)).unwrap();
            last = interpreter.eval(&node, &Environment::empty())?;
        }
        Ok(last)
    }

    pub fn eval(input: &str) -> Result<Value> {
        eval_all(&[input])
    }

    fn int(i: i64) -> Value {
        Value::Integer(i)
    }

    #[test]
    fn test_literals() {
        assert_eq!(eval("nil"), Ok(Value::Nil));
        assert_eq!(eval("42"), Ok(int(42)));
        assert_eq!(eval("\"hi\""), Ok(Value::String("hi".into())));
        assert_eq!(eval(":a/b"), Ok(Value::Keyword("a/b".into())));
        assert_eq!(eval("'foo-bar"), Ok(Value::Symbol("foo-bar".into())));
        assert_eq!(eval("[1 (+ 1 1)]"), Ok(Value::vector(vec![int(1), int(2)])));
        assert_eq!(
            eval("'(if x 1)"),
            Ok(Value::list(vec![
                Value::Symbol("if".into()),
                Value::Symbol("x".into()),
                int(1)
            ]))
        );
    }

    #[test]
    fn test_arithmetic_mirrors_emission() {
        assert_eq!(eval("(+)"), Ok(int(0)));
        assert_eq!(eval("(*)"), Ok(int(1)));
        assert_eq!(eval("(- 5)"), Ok(int(-5)));
        assert_eq!(eval("(/ 5)"), Ok(int(5)));
        assert_eq!(eval("(+ 1 2 3)"), Ok(int(6)));
        assert_eq!(eval("(- 10 2 3)"), Ok(int(5)));
        assert_eq!(eval("(/ 6 3)"), Ok(int(2)));
        assert_eq!(eval("(/ 1 2)"), Ok(Value::Decimal(0.5)));
        assert_eq!(eval("(+ 1 0.5)"), Ok(Value::Decimal(1.5)));
        assert_matches!(eval("(/ 1 0)"), Err(Error::ArithmeticError(_)));
        assert_matches!(eval("(+ 1 :a)"), Err(Error::WrongType { .. }));
    }

    #[test]
    fn test_integer_division_overflow() {
        assert_matches!(
            eval("(/ (- -9223372036854775807 1) -1)"),
            Err(Error::ArithmeticError(_))
        );
        assert_eq!(
            eval("(/ (- -9223372036854775807 1) 1)"),
            Ok(int(i64::MIN))
        );
        assert_eq!(eval("(/ -6 -3)"), Ok(int(2)));
    }

    #[test]
    fn test_operators() {
        assert_eq!(eval("(< 1 2)"), Ok(Value::Boolean(true)));
        assert_eq!(eval("(>= 1 2)"), Ok(Value::Boolean(false)));
        assert_eq!(eval("(= [1 2] '(1 2))"), Ok(Value::Boolean(true)));
        assert_eq!(eval("(identical? [1 2] '(1 2))"), Ok(Value::Boolean(false)));
        assert_eq!(eval("(mod 7 3)"), Ok(int(1)));
        assert_eq!(eval("(bit-shift-left 1 4)"), Ok(int(16)));
        assert_eq!(eval("(not nil)"), Ok(Value::Boolean(true)));
        assert_eq!(eval("(and 1 nil)"), Ok(Value::Nil));
        assert_eq!(eval("(or nil 2)"), Ok(int(2)));
        assert_eq!(eval("(or 1 (throw 2))"), Ok(int(1)));
        assert_matches!(
            eval("(instance? 1 Foo)"),
            Err(Error::UnsupportedOperator("instance?"))
        );
    }

    #[test]
    fn test_conditionals() {
        assert_eq!(eval("(if false 1 2)"), Ok(int(2)));
        assert_eq!(eval("(if 0 1 2)"), Ok(int(1)));
        assert_eq!(eval("(cond false 1)"), Ok(Value::Nil));
        assert_eq!(eval("(cond nil 1 (= 1 1) 2 :else 3)"), Ok(int(2)));
    }

    #[test]
    fn test_functions_and_closures() {
        assert_eq!(eval("((fn [a b] (+ a b)) 1 2)"), Ok(int(3)));
        assert_eq!(
            eval("((fn [a & more] more) 1 2 3)"),
            Ok(Value::list(vec![int(2), int(3)]))
        );
        assert_eq!(eval("((fn [a & more] more) 1)"), Ok(Value::Nil));
        assert_eq!(eval("(((fn [x] (fn [y] (+ x y))) 1) 2)"), Ok(int(3)));
        assert_eq!(eval("((fn ([] 0) ([a] a) ([a & r] r)) 7)"), Ok(int(7)));
        assert_matches!(
            eval("((fn [a] a))"),
            Err(Error::ArityMismatch { got: 0, .. })
        );
        assert_matches!(eval("(1 2)"), Err(Error::NotCallable(_)));
    }

    #[test]
    fn test_definitions_are_global() {
        assert_eq!(
            eval_all(&["(def inc (fn [x] (+ x 1)))", "(inc 41)"]),
            Ok(int(42))
        );
        assert_matches!(eval("undefined-thing"), Err(Error::UnboundVariable(_)));
    }

    #[test]
    fn test_loop_and_recur() {
        assert_eq!(
            eval("(loop [i 0 acc 1] (if (< i 5) (recur (+ i 1) (* acc 2)) acc))"),
            Ok(int(32))
        );
        assert_eq!(
            eval("(loop [i 0 j (+ i 1)] j)"),
            Ok(int(1)),
            "bindings see earlier bindings"
        );
        assert_matches!(
            eval("(loop [i 0] (recur 1 2))"),
            Err(Error::ArityMismatch { got: 2, .. })
        );
    }

    #[test]
    fn test_deep_loops_run_in_constant_stack() {
        assert_eq!(
            eval("(loop [i 0] (if (< i 100000) (recur (+ i 1)) i))"),
            Ok(int(100000))
        );
    }

    #[test]
    fn test_recur_in_function_body() {
        assert_eq!(
            eval("((fn [n acc] (if (= n 0) acc (recur (- n 1) (+ acc n)))) 100 0)"),
            Ok(int(5050))
        );
    }

    #[test]
    fn test_recur_outside_tail_position() {
        assert_eq!(
            eval("(loop [i 0] (+ 1 (recur 1)))"),
            Err(Error::RecurOutsideLoop)
        );
    }

    #[test]
    fn test_exceptions() {
        assert_eq!(eval("(throw :boom)"), Err(Error::Thrown(Value::Keyword("boom".into()))));
        assert_eq!(eval("(try (throw 1) (catch e (+ e 1)))"), Ok(int(2)));
        assert_eq!(
            eval("(try (undefined-thing) (catch e (string? e)))"),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            eval_all(&["(def x 0)", "(try 1 (finally (def x 2)))", "x"]),
            Ok(int(2))
        );
        assert_eq!(
            eval("(try (throw 1) (finally 2))"),
            Err(Error::Thrown(int(1)))
        );
    }

    #[test]
    fn test_recur_is_not_caught() {
        assert_eq!(
            eval("(loop [i 0] (try (if (< i 3) (recur (+ i 1)) i) (catch e 0)))"),
            Ok(int(3))
        );
        assert_eq!(
            eval_all(&[
                "(def cleanups 0)",
                "(loop [i 0] (try (if (< i 2) (recur (+ i 1)) i) (finally (def cleanups (+ cleanups 1)))))",
                "cleanups",
            ]),
            Ok(int(3))
        );
        assert_eq!(
            eval("(try (+ 1 (recur 2)) (catch e :caught))"),
            Err(Error::RecurOutsideLoop)
        );
    }

    #[test]
    fn test_interop_is_unsupported() {
        assert_eq!(
            eval("(new Date)"),
            Err(Error::Unsupported(NodeKind::ClassInstantiation))
        );
        assert_eq!(
            eval("(.- x length)"),
            Err(Error::Unsupported(NodeKind::PropertyResolution))
        );
    }

    #[test]
    fn test_unsupported_construct() {
        let mut session = Session::new(Target::JavaScript);
        let node = Frontend::new()
            .analyze(&mut session, &read_one("(fn [x] (if x (. x (toString)) x))"))
            .unwrap();

        match node {
            Node::Lambda(lambda) => assert_eq!(
                unsupported_construct(&lambda),
                Some(NodeKind::MethodResolution)
            ),
            other => panic!("expected lambda, got {:?}", other),
        }
    }
}
