#![cfg(test)]

// Property tests for ChainedTable kept inside the crate so they can check
// the structural invariants of the chains after every operation.

use crate::builder::TableBuilder;
use crate::chained_table::{ChainedTable, Put};
use crate::error::TableError;
use crate::key_ops::{BuildHasherOps, Djb2, FnKeyOps, KeyOps};
use crate::release::Release;
use proptest::prelude::*;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

// Pool-indexed operations so that shrinking moves towards earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum Op {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Bump(usize, i32),
    Resize(usize),
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Put(i, v)),
            2 => idx.clone().prop_map(Op::Remove),
            2 => idx.clone().prop_map(Op::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(Op::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Bump(i, d)),
            1 => (0usize..12).prop_map(Op::Resize),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

#[derive(Clone)]
struct Counter(Rc<Cell<usize>>);

impl<T> Release<T> for Counter {
    fn release(&mut self, item: T) {
        self.0.set(self.0.get() + 1);
        drop(item);
    }
}

// Drive a table and a std HashMap model through the same operations.
// Invariants exercised after each op:
// - `len` parity with the model; lookups agree on every pool key.
// - Every entry sits in the bucket its hash selects, reachable once.
// - Rejected resizes leave capacity unchanged; accepted ones apply it.
// - Every key and value handed to the table is released exactly once:
//   released so far == handed so far - live entries.
fn run<O>(ops_impl: O, pool: Vec<String>, ops: Vec<Op>) -> Result<(), TestCaseError>
where
    O: KeyOps<String> + KeyOps<str>,
{
    let keys_released = Rc::new(Cell::new(0));
    let vals_released = Rc::new(Cell::new(0));
    let mut sut = ChainedTable::with_parts(
        3,
        ops_impl,
        Counter(keys_released.clone()),
        Counter(vals_released.clone()),
    )
    .expect("non-zero capacity");
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut handed = 0usize;

    for op in ops {
        match op {
            Op::Put(i, v) => {
                let k = pool[i].clone();
                let expect = if model.contains_key(&k) {
                    Put::Replaced
                } else {
                    Put::Inserted
                };
                prop_assert_eq!(sut.put(k.clone(), v), expect);
                model.insert(k, v);
                handed += 1;
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k.as_str()), model.remove(k).is_some());
                prop_assert!(!sut.remove(k.as_str()), "second remove must fail");
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k.as_str()), model.get(k));
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            Op::Bump(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k.as_str()), model.get_mut(k)) {
                    (Some(a), Some(b)) => {
                        *a = a.wrapping_add(d);
                        *b = b.wrapping_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "get_mut disagrees with model"),
                }
            }
            Op::Resize(n) => {
                let before = sut.capacity();
                match sut.resize(n) {
                    Ok(()) => {
                        prop_assert!(n >= 1 && n >= model.len());
                        prop_assert_eq!(sut.capacity(), n);
                    }
                    Err(TableError::ZeroCapacity) => {
                        prop_assert_eq!(n, 0);
                        prop_assert_eq!(sut.capacity(), before);
                    }
                    Err(TableError::BelowLen { requested, len }) => {
                        prop_assert_eq!(requested, n);
                        prop_assert_eq!(len, model.len());
                        prop_assert!(n < len);
                        prop_assert_eq!(sut.capacity(), before);
                    }
                    Err(e) => prop_assert!(false, "unexpected error {e}"),
                }
            }
            Op::Clear => {
                sut.clear();
                model.clear();
                for k in &pool {
                    prop_assert!(!sut.contains_key(k.as_str()));
                }
            }
        }

        sut.assert_consistent();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        for k in &pool {
            prop_assert_eq!(sut.get(k.as_str()), model.get(k));
        }
        prop_assert_eq!(keys_released.get(), handed - model.len());
        prop_assert_eq!(vals_released.get(), handed - model.len());
    }

    drop(sut);
    prop_assert_eq!(keys_released.get(), handed);
    prop_assert_eq!(vals_released.get(), handed);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_default_hasher((pool, ops) in arb_scenario()) {
        let hasher: BuildHasherOps = BuildHasherOps::default();
        run(hasher, pool, ops)?;
    }

    #[test]
    fn prop_state_machine_djb2((pool, ops) in arb_scenario()) {
        run(Djb2, pool, ops)?;
    }
}

// Worst case: every key hashes to 0, so the whole table is one chain and
// only equality tells entries apart.
#[derive(Clone, Copy)]
struct Collide;

impl KeyOps<str> for Collide {
    fn hash(&self, _: &str) -> u64 {
        0
    }
    fn equal(&self, a: &str, b: &str) -> bool {
        a == b
    }
}

impl KeyOps<String> for Collide {
    fn hash(&self, _: &String) -> u64 {
        0
    }
    fn equal(&self, a: &String, b: &String) -> bool {
        a == b
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run(Collide, pool, ops)?;
    }

    // Resize to any capacity >= len keeps every entry reachable, for
    // closure-supplied hash functions as well.
    #[test]
    fn prop_resize_preserves_contents(
        keys in proptest::collection::hash_set(any::<u16>(), 0..64),
        caps in proptest::collection::vec(1usize..200, 1..6),
    ) {
        let ops = FnKeyOps::new(|k: &u16| u64::from(*k).wrapping_mul(31), |a: &u16, b: &u16| a == b);
        let mut sut = TableBuilder::new().capacity(7).key_ops(ops).build().unwrap();
        for &k in &keys {
            sut.put(k, u32::from(k) * 3);
        }
        for cap in caps {
            let r = sut.resize(cap);
            prop_assert_eq!(r.is_ok(), cap >= keys.len());
            sut.assert_consistent();
            prop_assert_eq!(sut.len(), keys.len());
            for &k in &keys {
                prop_assert_eq!(sut.get(&k), Some(&(u32::from(k) * 3)));
            }
        }
    }
}
