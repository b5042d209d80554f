use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Deref;
use std::rc::Rc;

/// A shared, immutable value handed out by an `Interner`.
///
/// Two `Interned` values obtained from the same table for equal keys point to
/// the same allocation, which is what `is_identical` checks.
#[repr(transparent)]
#[derive(Debug)]
pub struct Interned<T>(Rc<T>);

impl<T> Interned<T> {
    pub fn is_identical(&self, other: &Interned<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Interned<T> {
    fn clone(&self) -> Self {
        Interned(self.0.clone())
    }
}

impl<T> Deref for Interned<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Interned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.is_identical(other) || *self.0 == *other.0
    }
}

/// Append-only table of canonical instances.
#[derive(Debug)]
pub struct Interner<K, V> {
    implementation: FxHashMap<K, Interned<V>>,
}

impl<K: Hash + Eq, V> Default for Interner<K, V> {
    fn default() -> Self {
        Interner {
            implementation: FxHashMap::default(),
        }
    }
}

impl<K: Hash + Eq, V> Interner<K, V> {
    pub fn get_or_intern<F>(&mut self, key: K, make: F) -> Interned<V>
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(existing) = self.implementation.get(&key) {
            return existing.clone();
        }

        let value = Interned(Rc::new(make(&key)));
        self.implementation.insert(key, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.implementation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implementation.is_empty()
    }
}
