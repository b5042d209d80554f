use super::error::{self, Result};
use super::procedure::Procedure;
use crate::compiler::frontend::reader::form::Form;
use im_rc::Vector;
use std::fmt;
use std::rc::Rc;

/// Values the macro interpreter computes with.
///
/// Symbols and keywords keep their raw, unmangled text, exactly like the
/// forms macros receive and return. Maps and sets keep insertion order.
#[derive(Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    Rational(i64, i64),
    Decimal(f64),
    String(String),
    Symbol(String),
    Keyword(String),
    List(Vector<Value>),
    Vector(Vector<Value>),
    Map(Vector<(Value, Value)>),
    Set(Vector<Value>),
    Procedure(Rc<Procedure>),
}

impl Value {
    pub fn list<I: IntoIterator<Item = Value>>(elements: I) -> Self {
        Value::List(elements.into_iter().collect())
    }

    pub fn vector<I: IntoIterator<Item = Value>>(elements: I) -> Self {
        Value::Vector(elements.into_iter().collect())
    }

    pub fn map<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        let mut map = Vector::new();
        for (key, value) in entries {
            assoc(&mut map, key, value);
        }
        Value::Map(map)
    }

    pub fn set<I: IntoIterator<Item = Value>>(elements: I) -> Self {
        let mut set = Vector::new();
        for element in elements {
            adjoin(&mut set, element);
        }
        Value::Set(set)
    }

    /// Everything but `nil` and `false` is true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean(false))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Rational(_, _) => "rational",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Keyword(_) => "keyword",
            Value::List(_) => "list",
            Value::Vector(_) => "vector",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
            Value::Procedure(_) => "procedure",
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Integer(_) | Value::Rational(_, _) | Value::Decimal(_)
        )
    }

    /// Values are immutable, so identity only differs from equality for
    /// collections of different kinds.
    pub fn is_identical(&self, other: &Value) -> bool {
        self.type_name() == other.type_name() && self == other
    }

    /// The elements of a sequential view of the value.
    ///
    /// Map entries become `[key value]` vectors and strings become
    /// one-character strings.
    pub fn elements(&self) -> Result<Vector<Value>> {
        match self {
            Value::Nil => Ok(Vector::new()),
            Value::List(elements) | Value::Vector(elements) | Value::Set(elements) => {
                Ok(elements.clone())
            }
            Value::Map(entries) => Ok(entries
                .iter()
                .map(|(k, v)| Value::vector(vec![k.clone(), v.clone()]))
                .collect()),
            Value::String(s) => Ok(s.chars().map(|c| Value::String(c.to_string())).collect()),
            other => Err(error::wrong_type("a sequence", other)),
        }
    }

    pub fn from_form(form: &Form) -> Self {
        match form {
            Form::Nil => Value::Nil,
            Form::Boolean(b) => Value::Boolean(*b),
            Form::Integer(i) => Value::Integer(*i),
            Form::Rational(n, d) => Value::Rational(*n, *d),
            Form::Decimal(d) => Value::Decimal(*d),
            Form::String(s) => Value::String(s.clone()),
            Form::Symbol(s) => Value::Symbol(s.clone()),
            Form::Keyword(k) => Value::Keyword(k.clone()),
            Form::List(elements) => Value::list(elements.iter().map(Value::from_form)),
            Form::Vector(elements) => Value::vector(elements.iter().map(Value::from_form)),
            Form::Set(elements) => Value::set(elements.iter().map(Value::from_form)),
            Form::Map(entries) => Value::map(
                entries
                    .iter()
                    .map(|(k, v)| (Value::from_form(k), Value::from_form(v))),
            ),
        }
    }

    /// Convert back into a form. Procedures have no textual representation
    /// and fail.
    pub fn to_form(&self) -> Result<Form> {
        let form = match self {
            Value::Nil => Form::Nil,
            Value::Boolean(b) => Form::Boolean(*b),
            Value::Integer(i) => Form::Integer(*i),
            Value::Rational(n, d) => Form::Rational(*n, *d),
            Value::Decimal(d) => Form::Decimal(*d),
            Value::String(s) => Form::String(s.clone()),
            Value::Symbol(s) => Form::Symbol(s.clone()),
            Value::Keyword(k) => Form::Keyword(k.clone()),
            Value::List(elements) => Form::List(to_forms(elements)?),
            Value::Vector(elements) => Form::Vector(to_forms(elements)?),
            Value::Set(elements) => Form::Set(to_forms(elements)?),
            Value::Map(entries) => {
                let mut pairs = Vec::with_capacity(entries.len());
                for (k, v) in entries {
                    pairs.push((k.to_form()?, v.to_form()?));
                }
                Form::Map(pairs)
            }
            Value::Procedure(_) => {
                return Err(error::argument_error(
                    "a procedure can't be converted into a form",
                ))
            }
        };
        Ok(form)
    }
}

fn to_forms(elements: &Vector<Value>) -> Result<Vec<Form>> {
    elements.iter().map(Value::to_form).collect()
}

/// Insert or replace the entry for `key`.
pub fn assoc(map: &mut Vector<(Value, Value)>, key: Value, value: Value) {
    match map.iter().position(|(k, _)| *k == key) {
        Some(idx) => {
            map.set(idx, (key, value));
        }
        None => map.push_back((key, value)),
    }
}

/// Add `element` unless it is present already.
pub fn adjoin(set: &mut Vector<Value>, element: Value) {
    if !set.contains(&element) {
        set.push_back(element);
    }
}

fn same_entries(lhs: &Vector<(Value, Value)>, rhs: &Vector<(Value, Value)>) -> bool {
    lhs.len() == rhs.len()
        && lhs
            .iter()
            .all(|(k, v)| rhs.iter().any(|(rk, rv)| k == rk && v == rv))
}

impl PartialEq for Value {
    fn eq(&self, rhs: &Value) -> bool {
        match (self, rhs) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(l), Value::Boolean(r)) => l == r,
            (Value::Integer(l), Value::Integer(r)) => l == r,
            (Value::Rational(ln, ld), Value::Rational(rn, rd)) => {
                i128::from(*ln) * i128::from(*rd) == i128::from(*rn) * i128::from(*ld)
            }
            (Value::Decimal(l), Value::Decimal(r)) => l == r,
            (Value::String(l), Value::String(r)) => l == r,
            (Value::Symbol(l), Value::Symbol(r)) => l == r,
            (Value::Keyword(l), Value::Keyword(r)) => l == r,
            // sequential collections compare element-wise regardless of kind
            (Value::List(l), Value::List(r))
            | (Value::List(l), Value::Vector(r))
            | (Value::Vector(l), Value::List(r))
            | (Value::Vector(l), Value::Vector(r)) => l == r,
            (Value::Set(l), Value::Set(r)) => {
                l.len() == r.len() && l.iter().all(|e| r.contains(e))
            }
            (Value::Map(l), Value::Map(r)) => same_entries(l, r),
            (Value::Procedure(l), Value::Procedure(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({})", self)
    }
}

fn write_joined<'a, I>(f: &mut fmt::Formatter<'_>, elements: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a Value>,
{
    for (i, element) in elements.into_iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", element)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Rational(n, d) => write!(f, "{}/{}", n, d),
            Value::Decimal(d) => write!(f, "{:?}", d),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Symbol(s) => f.write_str(s),
            Value::Keyword(k) => write!(f, ":{}", k),
            Value::List(elements) => {
                f.write_str("(")?;
                write_joined(f, elements)?;
                f.write_str(")")
            }
            Value::Vector(elements) => {
                f.write_str("[")?;
                write_joined(f, elements)?;
                f.write_str("]")
            }
            Value::Set(elements) => {
                f.write_str("#{")?;
                write_joined(f, elements)?;
                f.write_str("}")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                f.write_str("}")
            }
            Value::Procedure(procedure) => write!(f, "#<procedure {}>", procedure.name()),
        }
    }
}
