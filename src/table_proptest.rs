#![cfg(test)]

// Property tests for ChainTable against a sequence model. The model is a
// Vec of (key, value) where add pushes to the front, lookups return the
// first match, replace edits the first match in place, and remove deletes
// the first match. That is exactly the table's contract: newest-first
// within a chain, duplicates never deduplicated, stored keys stable under
// replace.

use crate::table::ChainTable;
use core::hash::{BuildHasher, Hasher};
use proptest::prelude::*;
use std::collections::BTreeMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, the pool shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Add(usize, i32),
    Replace(usize, i32),
    Remove(usize),
    Find(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=6).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), -100..100i32).prop_map(|(i, v)| Op::Add(i, v)),
            (idx.clone(), -100..100i32).prop_map(|(i, v)| Op::Replace(i, v)),
            idx.clone().prop_map(Op::Remove),
            idx.prop_map(Op::Find),
            Just(Op::Iterate),
        ];
        (
            Just(pool),
            proptest::collection::vec(op, 1..120),
        )
    })
}

fn multiset(entries: impl Iterator<Item = (String, i32)>) -> BTreeMap<(String, i32), usize> {
    let mut m = BTreeMap::new();
    for e in entries {
        *m.entry(e).or_insert(0) += 1;
    }
    m
}

fn check_against_model<S>(make: impl Fn() -> ChainTable<String, i32, S>, pool: Vec<String>, ops: Vec<Op>) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut t = make();
    let mut model: Vec<(String, i32)> = Vec::new();

    for op in ops {
        match op {
            Op::Add(i, v) => {
                t.add(pool[i].clone(), v);
                model.insert(0, (pool[i].clone(), v));
            }
            Op::Replace(i, v) => {
                let old = t.replace(pool[i].clone(), v);
                match model.iter_mut().find(|(k, _)| *k == pool[i]) {
                    Some(slot) => {
                        prop_assert_eq!(old, Some(slot.1));
                        slot.1 = v;
                    }
                    None => {
                        prop_assert_eq!(old, None);
                        model.insert(0, (pool[i].clone(), v));
                    }
                }
            }
            Op::Remove(i) => {
                let got = t.remove(pool[i].as_str());
                match model.iter().position(|(k, _)| *k == pool[i]) {
                    Some(pos) => {
                        let (k, v) = model.remove(pos);
                        prop_assert_eq!(got, Some((k, v)));
                    }
                    None => prop_assert_eq!(got, None),
                }
            }
            Op::Find(i) => {
                let got = t.find(pool[i].as_str()).and_then(|h| h.value(&t)).copied();
                let want = model
                    .iter()
                    .find(|(k, _)| *k == pool[i])
                    .map(|(_, v)| *v);
                prop_assert_eq!(got, want);
            }
            Op::Iterate => {
                let seen = multiset(t.iter().map(|(k, v)| (k.clone(), *v)));
                let want = multiset(model.iter().cloned());
                prop_assert_eq!(seen, want);
            }
        }
        prop_assert_eq!(t.len(), model.len());
        prop_assert!(t.len() <= t.capacity());
    }
    Ok(())
}

proptest! {
    // Property: under the default polynomial hasher, the table agrees
    // with the sequence model after every operation, including across
    // growths triggered mid-sequence.
    #[test]
    fn table_matches_sequence_model((pool, ops) in arb_scenario()) {
        check_against_model(ChainTable::new, pool, ops)?;
    }

    // Property: same agreement when every key collides into one chain,
    // which stresses predecessor relinking and LIFO order the hardest.
    #[test]
    fn table_matches_model_under_total_collision((pool, ops) in arb_scenario()) {
        #[derive(Clone, Default)]
        struct ConstBuildHasher;
        struct ConstHasher;
        impl BuildHasher for ConstBuildHasher {
            type Hasher = ConstHasher;
            fn build_hasher(&self) -> Self::Hasher {
                ConstHasher
            }
        }
        impl Hasher for ConstHasher {
            fn write(&mut self, _bytes: &[u8]) {}
            fn finish(&self) -> u64 {
                0
            }
        }

        check_against_model(|| ChainTable::with_hasher(ConstBuildHasher), pool, ops)?;
    }

    // Property: N distinct adds leave every key retrievable with its own
    // value and walk the capacity sequence 7, 15, 31, ... as needed.
    #[test]
    fn distinct_keys_survive_any_number_of_growths(n in 0usize..200) {
        let mut t: ChainTable<String, i32> = ChainTable::new();
        for i in 0..n {
            t.add(format!("k{i}"), i as i32);
        }
        prop_assert_eq!(t.len(), n);
        prop_assert!(t.capacity() >= 7);
        // Capacity is always one of 7, 15, 31, ... (2^m * 8 - 1).
        prop_assert_eq!((t.capacity() + 1).count_ones(), 1);
        for i in 0..n {
            let h = t.find(&format!("k{i}")).expect("key lost in growth");
            prop_assert_eq!(h.value(&t), Some(&(i as i32)));
        }
    }
}
