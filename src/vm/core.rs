// The library available to macro bodies.
//
// Every function is bound twice: under its plain name and qualified with the
// `ws.core` namespace. Both go through the target's mangler, because that is
// what the analyzer does to the variables that refer to them.

use super::error::{self, Result};
use super::interpreter::Interpreter;
use super::procedure::{Arity, ForeignFunction, Procedure};
use super::value::{self, Value};
use crate::compiler::frontend::syntax::name::QualifiedName;
use crate::compiler::frontend::syntax::Variable;
use crate::compiler::utils::mangle::Mangler;
use im_rc::Vector;
use std::rc::Rc;

pub const NAMESPACE: &str = "ws.core";

const LIBRARY: &[(&str, Arity, ForeignFunction)] = &[
    ("list", Arity::AtLeast(0), list),
    ("vector", Arity::AtLeast(0), vector),
    ("hash-map", Arity::AtLeast(0), hash_map),
    ("hash-set", Arity::AtLeast(0), hash_set),
    ("first", Arity::Exactly(1), first),
    ("second", Arity::Exactly(1), second),
    ("rest", Arity::Exactly(1), rest),
    ("next", Arity::Exactly(1), next),
    ("cons", Arity::Exactly(2), cons),
    ("conj", Arity::AtLeast(1), conj),
    ("concat", Arity::AtLeast(0), concat),
    ("count", Arity::Exactly(1), count),
    ("nth", Arity::Between(2, 3), nth),
    ("empty?", Arity::Exactly(1), is_empty),
    ("list?", Arity::Exactly(1), is_list),
    ("vector?", Arity::Exactly(1), is_vector),
    ("map?", Arity::Exactly(1), is_map),
    ("set?", Arity::Exactly(1), is_set),
    ("symbol?", Arity::Exactly(1), is_symbol),
    ("keyword?", Arity::Exactly(1), is_keyword),
    ("string?", Arity::Exactly(1), is_string),
    ("number?", Arity::Exactly(1), is_number),
    ("nil?", Arity::Exactly(1), is_nil),
    ("seq?", Arity::Exactly(1), is_list),
    ("symbol", Arity::Between(1, 2), symbol),
    ("keyword", Arity::Between(1, 2), keyword),
    ("name", Arity::Exactly(1), name),
    ("namespace", Arity::Exactly(1), namespace),
    ("str", Arity::AtLeast(0), stringify),
    ("apply", Arity::AtLeast(2), apply),
    ("identity", Arity::Exactly(1), identity),
    ("gensym", Arity::Between(0, 1), gensym),
];

/// Names of the core functions, without namespace.
pub fn names() -> impl Iterator<Item = &'static str> {
    LIBRARY.iter().map(|(name, _, _)| *name)
}

pub fn register(interpreter: &mut Interpreter, mangler: &Mangler) {
    for (name, arity, function) in LIBRARY {
        let procedure = Value::Procedure(Rc::new(Procedure::foreign(*name, *arity, *function)));

        interpreter.define(
            Variable::mangled(&QualifiedName::unqualified(*name), mangler),
            procedure.clone(),
        );
        interpreter.define(
            Variable::mangled(&QualifiedName::new(Some(NAMESPACE), *name), mangler),
            procedure,
        );
    }
}

fn list(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    Ok(Value::list(args))
}

fn vector(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    Ok(Value::vector(args))
}

fn hash_map(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    if args.len() % 2 != 0 {
        return Err(error::argument_error(
            "hash-map expects an even number of arguments",
        ));
    }

    let mut entries = vec![];
    let mut args = args.into_iter();
    while let (Some(key), Some(value)) = (args.next(), args.next()) {
        entries.push((key, value));
    }
    Ok(Value::map(entries))
}

fn hash_set(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    Ok(Value::set(args))
}

fn first(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    Ok(args[0].elements()?.front().cloned().unwrap_or(Value::Nil))
}

fn second(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    Ok(args[0].elements()?.get(1).cloned().unwrap_or(Value::Nil))
}

fn rest(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let elements = args[0].elements()?;
    if elements.is_empty() {
        Ok(Value::List(Vector::new()))
    } else {
        Ok(Value::List(elements.skip(1)))
    }
}

fn next(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let elements = args[0].elements()?;
    if elements.len() <= 1 {
        Ok(Value::Nil)
    } else {
        Ok(Value::List(elements.skip(1)))
    }
}

fn cons(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let mut elements = args[1].elements()?;
    elements.push_front(args[0].clone());
    Ok(Value::List(elements))
}

/// Adds at the natural position of the collection: lists grow at the
/// front, vectors at the back. Maps take `[key value]` vectors.
fn conj(_: &mut Interpreter, mut args: Vec<Value>) -> Result<Value> {
    let additions = args.split_off(1);

    match args.remove(0) {
        Value::Nil => Ok(Value::List(additions.into_iter().rev().collect())),
        Value::List(mut elements) => {
            for addition in additions {
                elements.push_front(addition);
            }
            Ok(Value::List(elements))
        }
        Value::Vector(mut elements) => {
            elements.extend(additions);
            Ok(Value::Vector(elements))
        }
        Value::Set(mut elements) => {
            for addition in additions {
                value::adjoin(&mut elements, addition);
            }
            Ok(Value::Set(elements))
        }
        Value::Map(mut entries) => {
            for addition in additions {
                match addition.elements()? {
                    entry if entry.len() == 2 => {
                        value::assoc(&mut entries, entry[0].clone(), entry[1].clone())
                    }
                    _ => return Err(error::wrong_type("a [key value] entry", &addition)),
                }
            }
            Ok(Value::Map(entries))
        }
        other => Err(error::wrong_type("a collection", &other)),
    }
}

fn concat(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let mut result = Vector::new();
    for arg in &args {
        result.append(arg.elements()?);
    }
    Ok(Value::List(result))
}

fn count(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    Ok(Value::Integer(args[0].elements()?.len() as i64))
}

fn nth(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let elements = args[0].elements()?;
    let index = match &args[1] {
        Value::Integer(i) => *i,
        other => return Err(error::wrong_type("an integer index", other)),
    };

    let found = if index < 0 {
        None
    } else {
        elements.get(index as usize).cloned()
    };

    match (found, args.get(2)) {
        (Some(value), _) => Ok(value),
        (None, Some(default)) => Ok(default.clone()),
        (None, None) => Err(error::argument_error(format!(
            "index {} out of bounds for a collection of {} elements",
            index,
            elements.len()
        ))),
    }
}

fn is_empty(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    Ok(Value::Boolean(args[0].elements()?.is_empty()))
}

fn predicate(args: &[Value], test: fn(&Value) -> bool) -> Result<Value> {
    Ok(Value::Boolean(test(&args[0])))
}

fn is_list(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    predicate(&args, |v| matches!(v, Value::List(_)))
}

fn is_vector(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    predicate(&args, |v| matches!(v, Value::Vector(_)))
}

fn is_map(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    predicate(&args, |v| matches!(v, Value::Map(_)))
}

fn is_set(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    predicate(&args, |v| matches!(v, Value::Set(_)))
}

fn is_symbol(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    predicate(&args, |v| matches!(v, Value::Symbol(_)))
}

fn is_keyword(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    predicate(&args, |v| matches!(v, Value::Keyword(_)))
}

fn is_string(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    predicate(&args, |v| matches!(v, Value::String(_)))
}

fn is_number(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    predicate(&args, Value::is_number)
}

fn is_nil(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    predicate(&args, |v| matches!(v, Value::Nil))
}

/// `(symbol name)` or `(symbol ns name)`, joined back into raw text.
fn qualified_text(args: &[Value]) -> Result<String> {
    let text = |value: &Value| match value {
        Value::String(s) | Value::Symbol(s) | Value::Keyword(s) => Ok(s.clone()),
        other => Err(error::wrong_type("a string", other)),
    };

    match args {
        [name] => text(name),
        [Value::Nil, name] => text(name),
        [ns, name] => Ok(format!("{}/{}", text(ns)?, text(name)?)),
        _ => Err(error::argument_error("expected a name and an optional namespace")),
    }
}

fn symbol(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    qualified_text(&args).map(Value::Symbol)
}

fn keyword(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    qualified_text(&args).map(Value::Keyword)
}

fn name(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    match &args[0] {
        Value::String(s) => Ok(Value::String(s.clone())),
        Value::Symbol(s) | Value::Keyword(s) => {
            Ok(Value::String(QualifiedName::parse(s).name))
        }
        other => Err(error::wrong_type("a symbol, keyword or string", other)),
    }
}

fn namespace(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    match &args[0] {
        Value::Symbol(s) | Value::Keyword(s) => Ok(QualifiedName::parse(s)
            .namespace
            .map(Value::String)
            .unwrap_or(Value::Nil)),
        other => Err(error::wrong_type("a symbol or keyword", other)),
    }
}

/// Strings are taken verbatim and nil is empty.
fn stringify(_: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let mut result = String::new();
    for arg in &args {
        match arg {
            Value::Nil => (),
            Value::String(s) => result.push_str(s),
            other => result.push_str(&other.to_string()),
        }
    }
    Ok(Value::String(result))
}

/// `(apply f a b [c d])` calls `f` with `a b c d`.
fn apply(interpreter: &mut Interpreter, mut args: Vec<Value>) -> Result<Value> {
    let function = args.remove(0);
    let spread = match args.pop() {
        Some(last) => last.elements()?,
        None => Vector::new(),
    };
    args.extend(spread);
    interpreter.apply(&function, args)
}

fn identity(_: &mut Interpreter, mut args: Vec<Value>) -> Result<Value> {
    Ok(args.remove(0))
}

fn gensym(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value> {
    let prefix = match args.first() {
        None => "G__".to_string(),
        Some(Value::String(s)) | Some(Value::Symbol(s)) => s.clone(),
        Some(other) => return Err(error::wrong_type("a string prefix", other)),
    };
    Ok(Value::Symbol(interpreter.gensym(&prefix)))
}

#[cfg(test)]
mod tests {
    use super::super::error::Error;
    use super::super::interpreter::tests::{eval, eval_all};
    use super::*;

    fn int(i: i64) -> Value {
        Value::Integer(i)
    }

    fn ints(values: &[i64]) -> Value {
        Value::list(values.iter().cloned().map(Value::Integer))
    }

    #[test]
    fn test_constructors() {
        assert_eq!(eval("(list 1 2)"), Ok(ints(&[1, 2])));
        assert_eq!(eval("(vector)"), Ok(Value::vector(vec![])));
        assert_eq!(
            eval("(hash-map :a 1 :a 2)"),
            Ok(Value::map(vec![(Value::Keyword("a".into()), int(2))]))
        );
        assert_eq!(eval("(count (hash-set 1 1 2))"), Ok(int(2)));
        assert_matches!(eval("(hash-map :a)"), Err(Error::ArgumentError(_)));
    }

    #[test]
    fn test_sequence_functions() {
        assert_eq!(eval("(first '(1 2 3))"), Ok(int(1)));
        assert_eq!(eval("(first nil)"), Ok(Value::Nil));
        assert_eq!(eval("(second [1 2 3])"), Ok(int(2)));
        assert_eq!(eval("(rest [1 2 3])"), Ok(ints(&[2, 3])));
        assert_eq!(eval("(rest [])"), Ok(ints(&[])));
        assert_eq!(eval("(next [1])"), Ok(Value::Nil));
        assert_eq!(eval("(cons 0 [1 2])"), Ok(ints(&[0, 1, 2])));
        assert_eq!(eval("(concat [1] '(2) nil [3])"), Ok(ints(&[1, 2, 3])));
        assert_eq!(eval("(nth [1 2 3] 1)"), Ok(int(2)));
        assert_eq!(eval("(nth [1 2 3] 5 :none)"), Ok(Value::Keyword("none".into())));
        assert_matches!(eval("(nth [1 2 3] 5)"), Err(Error::ArgumentError(_)));
        assert_eq!(eval("(empty? [])"), Ok(Value::Boolean(true)));
        assert_eq!(eval("(count \"abc\")"), Ok(int(3)));
    }

    #[test]
    fn test_conj_respects_collection_kind() {
        assert_eq!(eval("(conj '(2 3) 1)"), Ok(ints(&[1, 2, 3])));
        assert_eq!(
            eval("(conj [1 2] 3)"),
            Ok(Value::vector(vec![int(1), int(2), int(3)]))
        );
        assert_eq!(eval("(conj nil 1)"), Ok(ints(&[1])));
        assert_eq!(eval("(count (conj #{1} 1 2))"), Ok(int(2)));
        assert_eq!(
            eval("(conj {:a 1} [:b 2])"),
            Ok(Value::map(vec![
                (Value::Keyword("a".into()), int(1)),
                (Value::Keyword("b".into()), int(2))
            ]))
        );
    }

    #[test]
    fn test_predicates() {
        assert_eq!(eval("(list? '(1))"), Ok(Value::Boolean(true)));
        assert_eq!(eval("(vector? '(1))"), Ok(Value::Boolean(false)));
        assert_eq!(eval("(symbol? 'a)"), Ok(Value::Boolean(true)));
        assert_eq!(eval("(keyword? :a)"), Ok(Value::Boolean(true)));
        assert_eq!(eval("(number? 1/2)"), Ok(Value::Boolean(true)));
        assert_eq!(eval("(nil? nil)"), Ok(Value::Boolean(true)));
        assert_eq!(eval("(map? {})"), Ok(Value::Boolean(true)));
    }

    #[test]
    fn test_names() {
        assert_eq!(eval("(symbol \"ns\" \"x\")"), Ok(Value::Symbol("ns/x".into())));
        assert_eq!(eval("(keyword \"x\")"), Ok(Value::Keyword("x".into())));
        assert_eq!(eval("(name :ns/x)"), Ok(Value::String("x".into())));
        assert_eq!(eval("(namespace 'ns/x)"), Ok(Value::String("ns".into())));
        assert_eq!(eval("(namespace 'x)"), Ok(Value::Nil));
        assert_eq!(eval("(str \"a\" 1 nil :b)"), Ok(Value::String("a1:b".into())));
    }

    #[test]
    fn test_apply_and_identity() {
        assert_eq!(eval("(apply list 1 [2 3])"), Ok(ints(&[1, 2, 3])));
        assert_eq!(eval("(apply (fn [a b] (+ a b)) [1 2])"), Ok(int(3)));
        assert_eq!(eval("(identity :x)"), Ok(Value::Keyword("x".into())));
    }

    #[test]
    fn test_gensym_is_fresh() {
        assert_eq!(
            eval_all(&["(def a (gensym))", "(def b (gensym))", "(= a b)"]),
            Ok(Value::Boolean(false))
        );
        assert_eq!(eval("(gensym)"), Ok(Value::Symbol("G__1".into())));
        assert_eq!(eval("(gensym \"tmp\")"), Ok(Value::Symbol("tmp1".into())));
    }

    #[test]
    fn test_qualified_core_names() {
        assert_eq!(eval("(ws.core/list 1)"), Ok(ints(&[1])));
    }

    #[test]
    fn test_arity_is_checked() {
        assert_matches!(
            eval("(first 1 2)"),
            Err(Error::ArityMismatch { got: 2, .. })
        );
    }
}
