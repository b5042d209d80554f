use std::fmt;

/// Parsed, not yet analyzed data.
///
/// Forms are what the reader produces and what macros consume and return.
/// Symbols and keywords keep their raw token text (without the leading `:`
/// for keywords); splitting into namespace and name happens during analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    List(Vec<Form>),
    Vector(Vec<Form>),
    Map(Vec<(Form, Form)>),
    Set(Vec<Form>),
    Symbol(String),
    Keyword(String),
    Integer(i64),
    Rational(i64, i64),
    Decimal(f64),
    String(String),
    Boolean(bool),
    Nil,
}

impl Form {
    pub fn symbol<S: Into<String>>(name: S) -> Self {
        Form::Symbol(name.into())
    }

    pub fn keyword<S: Into<String>>(name: S) -> Self {
        Form::Keyword(name.into())
    }

    pub fn string<S: Into<String>>(value: S) -> Self {
        Form::String(value.into())
    }

    pub fn list<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Form>,
    {
        Form::List(elements.into_iter().map(Into::into).collect())
    }

    pub fn vector<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Form>,
    {
        Form::Vector(elements.into_iter().map(Into::into).collect())
    }

    /// Build a set, dropping duplicate elements while keeping first occurrences.
    pub fn set<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Form>,
    {
        let mut unique: Vec<Form> = vec![];
        for element in elements.into_iter().map(Into::into) {
            if !unique.contains(&element) {
                unique.push(element);
            }
        }
        Form::Set(unique)
    }

    pub fn quote(form: Form) -> Self {
        Form::List(vec![Form::symbol("quote"), form])
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Form::Symbol(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Form::List(_))
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Form::Symbol(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Form::Keyword(k) => Some(k.as_str()),
            _ => None,
        }
    }

    pub fn list_slice(&self) -> Option<&[Form]> {
        match self {
            Form::List(elements) => Some(&elements[..]),
            _ => None,
        }
    }

    /// The head symbol of a list form, if there is one.
    pub fn head_symbol(&self) -> Option<&str> {
        self.list_slice()
            .and_then(|elements| elements.first())
            .and_then(Form::as_symbol)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Form::List(_) => "list",
            Form::Vector(_) => "vector",
            Form::Map(_) => "map",
            Form::Set(_) => "set",
            Form::Symbol(_) => "symbol",
            Form::Keyword(_) => "keyword",
            Form::Integer(_) => "integer",
            Form::Rational(_, _) => "rational",
            Form::Decimal(_) => "decimal",
            Form::String(_) => "string",
            Form::Boolean(_) => "boolean",
            Form::Nil => "nil",
        }
    }
}

impl From<i64> for Form {
    fn from(value: i64) -> Self {
        Form::Integer(value)
    }
}

impl From<bool> for Form {
    fn from(value: bool) -> Self {
        Form::Boolean(value)
    }
}

impl From<&str> for Form {
    fn from(value: &str) -> Self {
        Form::String(value.to_string())
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, elements: &[Form]) -> fmt::Result {
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", element)?;
    }
    Ok(())
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Form::List(elements) => {
                f.write_str("(")?;
                write_joined(f, elements)?;
                f.write_str(")")
            }
            Form::Vector(elements) => {
                f.write_str("[")?;
                write_joined(f, elements)?;
                f.write_str("]")
            }
            Form::Set(elements) => {
                f.write_str("#{")?;
                write_joined(f, elements)?;
                f.write_str("}")
            }
            Form::Map(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                f.write_str("}")
            }
            Form::Symbol(s) => f.write_str(s),
            Form::Keyword(k) => write!(f, ":{}", k),
            Form::Integer(i) => write!(f, "{}", i),
            Form::Rational(n, d) => write!(f, "{}/{}", n, d),
            Form::Decimal(d) => write!(f, "{:?}", d),
            Form::String(s) => write!(f, "{:?}", s),
            Form::Boolean(b) => write!(f, "{}", b),
            Form::Nil => f.write_str("nil"),
        }
    }
}
