//! chain-hashmap: a single-threaded, separate-chaining hash map from
//! byte-string keys to either an opaque reference value or a plain
//! integer, built for use inside a document-processing pipeline.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the table's interesting behavior — bucket chains, the
//!   2n+1 growth schedule, duplicate-tolerant insertion, and the
//!   resumable cursor — in one small, auditable structural layer, with
//!   the dual value typing as a thin surface on top.
//! - Layers:
//!   - ChainTable<K, V, S>: structural map. Chain nodes live in a
//!     slotmap arena and are linked by generational index, never by raw
//!     pointer; buckets are a plain vector of chain heads. Includes a
//!     debug-only reentrancy guard at each public entry point.
//!   - ChainMap<K, R, S>: public API storing a tagged `Value<R>`
//!     (reference or integer) per entry, with typed accessors.
//!
//! Constraints
//! - Single-threaded: callers serialize their own access.
//! - Keys are compared by byte content via `K: AsRef<[u8]>`. Whether the
//!   map owns key storage is a property of `K` itself: pick `String` or
//!   `Box<[u8]>` for owned keys, `&'static str` or a newtype over
//!   `Rc<str>` for shared ones. There is no ownership flag to get out of
//!   sync with call sites.
//! - `add` never deduplicates: inserting a key twice stores two entries,
//!   and lookups see the newest one first (LIFO within a chain).
//! - Growth doubles-plus-one the bucket count (7, 15, 31, ...) whenever
//!   the entry count reaches it, rehashing every entry; bucket indices
//!   depend on capacity and are never cached on a node.
//! - Iteration borrows the table, so mutating during iteration is a
//!   compile error rather than undefined behavior; dropping an iterator
//!   early releases it on every exit path.
//!
//! Why this split?
//! - Localize invariants: chain linkage and growth live entirely in
//!   ChainTable; ChainMap never touches a bucket.
//! - No unsafe anywhere: the arena hands out generational keys, so a
//!   stale `Handle` resolves to `None` instead of aliasing a reused slot.
//!
//! Notes and non-goals
//! - Not found is a normal outcome, reported as `None`; no operation has
//!   a recoverable error. Allocation failure aborts.
//! - The map never allocates or frees the payload behind `Value::Ref`;
//!   it only drops its own `R` handle, whose semantics the caller picks.
//! - No ordering guarantees over keys; iteration order is deterministic
//!   for a given capacity and hasher but otherwise unspecified.
//! - No persistence, no serialization, no concurrent access.

pub mod chain_map;
mod guard;
pub mod hash;
pub mod table;
mod table_proptest;

// Public surface
pub use chain_map::{ChainMap, Value};
pub use hash::PolyHasher;
pub use table::{ChainTable, Handle};
