use std::fmt;

/// A possibly namespaced name as written in source, e.g. `ws.core/list`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: Option<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn new<N: Into<String>>(namespace: Option<&str>, name: N) -> Self {
        Self {
            namespace: namespace.map(String::from),
            name: name.into(),
        }
    }

    pub fn unqualified<N: Into<String>>(name: N) -> Self {
        Self::new(None, name)
    }

    /// Split a raw token on its first `/`.
    ///
    /// A bare `/` and tokens that start or end with `/` are taken as
    /// unqualified names, so the division operator keeps working.
    pub fn parse(token: &str) -> Self {
        match token.find('/') {
            Some(idx) if idx > 0 && idx < token.len() - 1 => {
                Self::new(Some(&token[..idx]), &token[idx + 1..])
            }
            _ => Self::unqualified(token),
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.namespace.is_some()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified() {
        assert_eq!(
            QualifiedName::parse("ws.core/list"),
            QualifiedName::new(Some("ws.core"), "list")
        );
        assert_eq!(
            QualifiedName::parse("a/b/c"),
            QualifiedName::new(Some("a"), "b/c")
        );
    }

    #[test]
    fn test_parse_unqualified() {
        assert_eq!(QualifiedName::parse("/"), QualifiedName::unqualified("/"));
        assert_eq!(QualifiedName::parse("foo"), QualifiedName::unqualified("foo"));
        assert_eq!(QualifiedName::parse("foo/"), QualifiedName::unqualified("foo/"));
    }

    #[test]
    fn test_display() {
        assert_eq!(QualifiedName::parse("ns/x").to_string(), "ns/x");
        assert_eq!(QualifiedName::parse("x").to_string(), "x");
    }
}
