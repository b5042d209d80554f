use super::name::QualifiedName;
use crate::compiler::utils::interner::{Interned, Interner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nil;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword(pub QualifiedName);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(pub QualifiedName);

impl Keyword {
    pub fn name(&self) -> &QualifiedName {
        &self.0
    }
}

impl Symbol {
    pub fn name(&self) -> &QualifiedName {
        &self.0
    }
}

/// Canonical instances of the interned literal kinds.
///
/// Interning the same value twice through the same table yields the identical
/// instance, which `Interned::is_identical` exposes.
#[derive(Debug, Default)]
pub struct InternTable {
    nil: Interner<Nil, Nil>,
    booleans: Interner<bool, bool>,
    integers: Interner<i64, i64>,
    strings: Interner<String, String>,
    keywords: Interner<QualifiedName, Keyword>,
    symbols: Interner<QualifiedName, Symbol>,
}

impl InternTable {
    pub fn nil(&mut self) -> Interned<Nil> {
        self.nil.get_or_intern(Nil, |_| Nil)
    }

    pub fn boolean(&mut self, value: bool) -> Interned<bool> {
        self.booleans.get_or_intern(value, |v| *v)
    }

    pub fn integer(&mut self, value: i64) -> Interned<i64> {
        self.integers.get_or_intern(value, |v| *v)
    }

    pub fn string<S: Into<String>>(&mut self, value: S) -> Interned<String> {
        self.strings.get_or_intern(value.into(), String::clone)
    }

    pub fn keyword(&mut self, name: QualifiedName) -> Interned<Keyword> {
        self.keywords.get_or_intern(name, |n| Keyword(n.clone()))
    }

    pub fn symbol(&mut self, name: QualifiedName) -> Interned<Symbol> {
        self.symbols.get_or_intern(name, |n| Symbol(n.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_identical() {
        let mut table = InternTable::default();
        let a = table.keyword(QualifiedName::parse("ns/a"));
        let b = table.keyword(QualifiedName::parse("ns/a"));
        let c = table.keyword(QualifiedName::parse("a"));

        assert!(a.is_identical(&b));
        assert!(!a.is_identical(&c));
    }

    #[test]
    fn test_separate_tables_are_not_identical() {
        let mut first = InternTable::default();
        let mut second = InternTable::default();

        let a = first.symbol(QualifiedName::parse("x"));
        let b = second.symbol(QualifiedName::parse("x"));

        assert!(!a.is_identical(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_scalars_are_identical() {
        let mut table = InternTable::default();

        assert!(table.nil().is_identical(&table.nil()));
        assert!(table.boolean(true).is_identical(&table.boolean(true)));
        assert!(table.integer(42).is_identical(&table.integer(42)));
        assert!(table.string("foo").is_identical(&table.string("foo")));
        assert!(!table.boolean(true).is_identical(&table.boolean(false)));
    }
}
