//! ChainTable: structural layer. Bucket chains over a slotmap arena.
//!
//! Every chain node lives in the arena under a generational key; a bucket
//! is just the arena key of its newest node, and nodes link onward with
//! `next`. All linkage is by index, so removal is safe relinking rather
//! than pointer surgery, and a `Handle` kept past a removal resolves to
//! `None` instead of aliasing a reused slot.

use crate::guard::ReentryCheck;
use crate::hash::PolyBuildHasher;
use core::hash::{BuildHasher, Hasher};
use core::mem;
use slotmap::{DefaultKey, SlotMap};

/// Bucket count of a fresh table. Growth follows 2n+1: 7, 15, 31, ...
const INITIAL_BUCKETS: usize = 7;

/// Stable reference to one stored entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }

    pub fn key<'a, K, V, S>(&self, table: &'a ChainTable<K, V, S>) -> Option<&'a K>
    where
        K: AsRef<[u8]>,
        S: BuildHasher,
    {
        table.handle_key(*self)
    }

    pub fn value<'a, K, V, S>(&self, table: &'a ChainTable<K, V, S>) -> Option<&'a V>
    where
        K: AsRef<[u8]>,
        S: BuildHasher,
    {
        table.handle_value(*self)
    }

    pub fn value_mut<'a, K, V, S>(&self, table: &'a mut ChainTable<K, V, S>) -> Option<&'a mut V>
    where
        K: AsRef<[u8]>,
        S: BuildHasher,
    {
        table.handle_value_mut(*self)
    }
}

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    next: Option<DefaultKey>,
}

pub struct ChainTable<K, V, S = PolyBuildHasher> {
    hasher: S,
    slots: SlotMap<DefaultKey, Node<K, V>>, // node arena, chains link by key
    buckets: Vec<Option<DefaultKey>>,
    check: ReentryCheck,
}

impl<K, V> ChainTable<K, V>
where
    K: AsRef<[u8]>,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V> Default for ChainTable<K, V>
where
    K: AsRef<[u8]>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainTable<K, V, S>
where
    K: AsRef<[u8]>,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            slots: SlotMap::with_key(),
            buckets: vec![None; INITIAL_BUCKETS],
            check: ReentryCheck::new(),
        }
    }

    /// Live entries, duplicates included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current bucket count. Never smaller than `len()` after an insert
    /// returns; growth runs before the insert that would violate that.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Home bucket under the current capacity. Recomputed per operation;
    /// never cached on a node, since it changes on every growth.
    fn home_bucket(&self, bytes: &[u8]) -> usize {
        let mut h = self.hasher.build_hasher();
        h.write(bytes);
        (h.finish() % self.buckets.len() as u64) as usize
    }

    fn locate(&self, query: &[u8]) -> Option<DefaultKey> {
        let mut cur = self.buckets[self.home_bucket(query)];
        while let Some(id) = cur {
            let node = &self.slots[id];
            if node.key.as_ref() == query {
                return Some(id);
            }
            cur = node.next;
        }
        None
    }

    /// Prepend a node to its home bucket, growing first if full.
    fn push_front(&mut self, key: K, value: V) {
        if self.slots.len() >= self.buckets.len() {
            self.grow();
        }
        let b = self.home_bucket(key.as_ref());
        let next = self.buckets[b];
        let id = self.slots.insert(Node { key, value, next });
        self.buckets[b] = Some(id);
    }

    /// Rehash into 2n+1 buckets. Relinking goes oldest-first within each
    /// old chain so every new chain stays newest-first; duplicate keys
    /// must keep their LIFO shadowing across a rehash.
    fn grow(&mut self) {
        let grown = 2 * self.buckets.len() + 1;
        let old = mem::replace(&mut self.buckets, vec![None; grown]);
        let mut chain = Vec::new();
        for mut head in old {
            chain.clear();
            while let Some(id) = head {
                head = self.slots[id].next;
                chain.push(id);
            }
            for &id in chain.iter().rev() {
                let b = self.home_bucket(self.slots[id].key.as_ref());
                let node = &mut self.slots[id];
                node.next = self.buckets[b];
                self.buckets[b] = Some(id);
            }
        }
    }

    /// Pure insert: prepends unconditionally, never deduplicates. Two
    /// adds of the same key leave two entries; lookups find the newer
    /// one until it is removed.
    pub fn add(&mut self, key: K, value: V) {
        let _g = self.check.enter();
        self.push_front(key, value);
    }

    /// Upsert. On a hit the stored value is overwritten and the incoming
    /// key is dropped — the entry keeps the key object it was first
    /// inserted with, so repeated replaces preserve key identity. On a
    /// miss this is an `add`.
    pub fn replace(&mut self, key: K, value: V) -> Option<V> {
        let _g = self.check.enter();
        match self.locate(key.as_ref()) {
            Some(id) => Some(mem::replace(&mut self.slots[id].value, value)),
            None => {
                self.push_front(key, value);
                None
            }
        }
    }

    /// Look up by byte content. `&str`, `&[u8]`, and stored-key queries
    /// all hit the same entries.
    pub fn find<Q>(&self, query: &Q) -> Option<Handle>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        let _g = self.check.enter();
        self.locate(query.as_ref()).map(Handle::new)
    }

    pub fn contains_key<Q>(&self, query: &Q) -> bool
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        self.find(query).is_some()
    }

    /// Remove the newest entry matching `query`, returning its key and
    /// value. One walk both finds the node and tracks its predecessor
    /// for the relink (chains are singly linked).
    pub fn remove<Q>(&mut self, query: &Q) -> Option<(K, V)>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        let _g = self.check.enter();
        let qb = query.as_ref();
        let b = self.home_bucket(qb);
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[b];
        while let Some(id) = cur {
            if self.slots[id].key.as_ref() == qb {
                let node = self.slots.remove(id)?;
                match prev {
                    Some(p) => self.slots[p].next = node.next,
                    None => self.buckets[b] = node.next,
                }
                return Some((node.key, node.value));
            }
            prev = cur;
            cur = self.slots[id].next;
        }
        None
    }

    pub(crate) fn handle_key(&self, h: Handle) -> Option<&K> {
        self.slots.get(h.0).map(|n| &n.key)
    }

    pub(crate) fn handle_value(&self, h: Handle) -> Option<&V> {
        self.slots.get(h.0).map(|n| &n.value)
    }

    pub(crate) fn handle_value_mut(&mut self, h: Handle) -> Option<&mut V> {
        self.slots.get_mut(h.0).map(|n| &mut n.value)
    }

    /// Cursor over every entry in bucket order, chains newest-first.
    /// Deterministic for a given capacity and hasher, otherwise
    /// unspecified. Borrows the table, so structural mutation during
    /// iteration is rejected at compile time; dropping the iterator
    /// early needs no explicit teardown.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            table: self,
            bucket: 0,
            cur: None,
        }
    }
}

/// Resumable cursor: (next bucket to scan, current node). Fresh cursors
/// start before the first bucket; exhaustion is terminal.
pub struct Iter<'a, K, V, S = PolyBuildHasher> {
    table: &'a ChainTable<K, V, S>,
    bucket: usize,
    cur: Option<DefaultKey>,
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let t = self.table;
        if let Some(id) = self.cur {
            self.cur = t.slots[id].next;
        }
        while self.cur.is_none() {
            if self.bucket == t.buckets.len() {
                return None;
            }
            self.cur = t.buckets[self.bucket];
            self.bucket += 1;
        }
        let node = &t.slots[self.cur?];
        Some((&node.key, &node.value))
    }
}
