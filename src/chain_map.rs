//! ChainMap: the dual-typed public surface over [`ChainTable`].
//!
//! Each entry stores a [`Value`]: either an opaque reference payload `R`
//! (caller-owned; the map only drops its own `R` handle) or a plain
//! `i32`. The original union slot becomes a tagged variant, so a lookup
//! asking for the wrong kind reports absent instead of reinterpreting
//! bits.

use crate::hash::PolyBuildHasher;
use crate::table::{self, ChainTable};
use core::hash::BuildHasher;

/// One stored value: an opaque reference payload or an integer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value<R> {
    Ref(R),
    Int(i32),
}

impl<R> Value<R> {
    pub fn as_ref_value(&self) -> Option<&R> {
        match self {
            Value::Ref(r) => Some(r),
            Value::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Ref(_) => None,
            Value::Int(n) => Some(*n),
        }
    }

    pub fn into_ref_value(self) -> Option<R> {
        match self {
            Value::Ref(r) => Some(r),
            Value::Int(_) => None,
        }
    }
}

/// Byte-string-keyed map holding reference or integer values.
///
/// Thin layer over [`ChainTable`]; all chain, growth, and duplicate
/// semantics are the structural layer's. Absent keys and kind-mismatched
/// lookups both come back as `None` — neither is an error.
pub struct ChainMap<K, R, S = PolyBuildHasher> {
    table: ChainTable<K, Value<R>, S>,
}

impl<K, R> ChainMap<K, R>
where
    K: AsRef<[u8]>,
{
    pub fn new() -> Self {
        Self {
            table: ChainTable::new(),
        }
    }
}

impl<K, R> Default for ChainMap<K, R>
where
    K: AsRef<[u8]>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, R, S> ChainMap<K, R, S>
where
    K: AsRef<[u8]>,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: ChainTable::with_hasher(hasher),
        }
    }

    /// Live entries, duplicates included.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Pure insert of a reference value; duplicates shadow, LIFO.
    pub fn add(&mut self, key: K, payload: R) {
        self.table.add(key, Value::Ref(payload));
    }

    /// Pure insert of an integer value; duplicates shadow, LIFO.
    pub fn add_int(&mut self, key: K, n: i32) {
        self.table.add(key, Value::Int(n));
    }

    /// Upsert a reference value. A hit may change the stored kind; the
    /// entry keeps its original key object either way.
    pub fn replace(&mut self, key: K, payload: R) -> Option<Value<R>> {
        self.table.replace(key, Value::Ref(payload))
    }

    /// Upsert an integer value.
    pub fn replace_int(&mut self, key: K, n: i32) -> Option<Value<R>> {
        self.table.replace(key, Value::Int(n))
    }

    /// Newest reference value stored under `query`, or `None` for an
    /// absent key or an integer entry.
    pub fn get<Q>(&self, query: &Q) -> Option<&R>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        self.table
            .find(query)
            .and_then(|h| h.value(&self.table))
            .and_then(Value::as_ref_value)
    }

    /// Newest integer value stored under `query`, or `None` for an
    /// absent key or a reference entry.
    pub fn get_int<Q>(&self, query: &Q) -> Option<i32>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        self.table
            .find(query)
            .and_then(|h| h.value(&self.table))
            .and_then(Value::as_int)
    }

    pub fn contains_key<Q>(&self, query: &Q) -> bool
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        self.table.contains_key(query)
    }

    /// Remove the newest entry for `query` and hand back its value,
    /// whichever kind it holds. The key object is dropped.
    pub fn remove<Q>(&mut self, query: &Q) -> Option<Value<R>>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        self.table.remove(query).map(|(_key, value)| value)
    }

    /// Cursor over every entry; see [`ChainTable::iter`] for order and
    /// mutation rules.
    pub fn iter(&self) -> Iter<'_, K, R, S> {
        Iter {
            inner: self.table.iter(),
        }
    }
}

/// Iterator over `(key, value)` pairs of a [`ChainMap`].
pub struct Iter<'a, K, R, S = PolyBuildHasher> {
    inner: table::Iter<'a, K, Value<R>, S>,
}

impl<'a, K, R, S> Iterator for Iter<'a, K, R, S> {
    type Item = (&'a K, &'a Value<R>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
