// ChainedTable integration tests.
//
// Each test documents the behavior verified. The core invariants exercised:
// - Uniqueness: the latest put wins and len counts distinct keys.
// - Absence: a second remove of the same key fails.
// - Resize: preserves contents, rejects zero and below-len capacities.
// - Clear: empties the table but keeps capacity.
// - Release: every key and value is released once, never during resize.
use chain_table::{
    ChainedTable, DropRelease, FnKeyOps, Put, StringTable, TableBuilder, TableError,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

// Test: the string-keyed scenario from the demonstration program.
#[test]
fn string_table_walkthrough() {
    let mut m: StringTable<String> = ChainedTable::string_keyed(10).expect("create");
    assert_eq!(m.put("key1".to_string(), "value1".to_string()), Put::Inserted);
    assert_eq!(m.put("key2".to_string(), "value2".to_string()), Put::Inserted);
    assert_eq!(m.len(), 2);
    assert_eq!(m.get("key1").map(String::as_str), Some("value1"));
    assert!(m.contains_key("key2"));
    assert!(m.remove("key1"));
    assert_eq!(m.len(), 1);
    m.clear();
    assert_eq!(m.len(), 0);
    m.destroy();
}

// Test: uniqueness under repeated puts.
// Verifies: the most recent value is kept for each key; len counts keys.
#[test]
fn latest_put_wins() {
    let mut m = ChainedTable::new(4).unwrap();
    let mut model = BTreeMap::new();
    for round in 0..5u32 {
        for k in 0..13u32 {
            m.put(k, round * 100 + k);
            model.insert(k, round * 100 + k);
        }
    }
    assert_eq!(m.len(), model.len());
    for (k, v) in &model {
        assert_eq!(m.get(k), Some(v));
    }
}

#[test]
fn second_remove_reports_absence() {
    let mut m: StringTable<u8> = ChainedTable::string_keyed(2).unwrap();
    m.put("k".into(), 1);
    assert!(m.remove("k"));
    assert!(!m.remove("k"));
    assert!(!m.remove("never"));
}

// Test: resize rejection leaves contents and capacity untouched.
#[test]
fn rejected_resize_is_a_no_op() {
    let mut m = ChainedTable::new(8).unwrap();
    for i in 0..5i64 {
        m.put(i, -i);
    }
    assert_eq!(m.resize(0), Err(TableError::ZeroCapacity));
    assert_eq!(
        m.resize(4),
        Err(TableError::BelowLen {
            requested: 4,
            len: 5
        })
    );
    assert_eq!(m.capacity(), 8);
    for i in 0..5i64 {
        assert_eq!(m.get(&i), Some(&-i));
    }
}

// Test: growing a single-bucket table spreads the chain out.
#[test]
fn resize_shortens_chains_with_spread_hash() {
    let ops = FnKeyOps::new(|k: &u64| *k, |a: &u64, b: &u64| a == b);
    let mut m = ChainedTable::with_parts(1, ops, DropRelease, DropRelease).unwrap();
    for k in 0..64u64 {
        m.put(k, k.to_string());
    }
    assert_eq!(m.longest_chain(), 64);
    m.resize(64).unwrap();
    assert_eq!(m.longest_chain(), 1);
    assert!((m.load_factor() - 1.0).abs() < f64::EPSILON);
    for k in 0..64u64 {
        assert_eq!(m.get(&k), Some(&k.to_string()));
    }
}

#[test]
fn clear_keeps_capacity_and_table_usable() {
    let mut m = ChainedTable::new(7).unwrap();
    for k in ["a", "b", "c"] {
        m.put(k.to_string(), ());
    }
    m.clear();
    assert!(m.is_empty());
    assert_eq!(m.capacity(), 7);
    for k in ["a", "b", "c"] {
        assert!(!m.contains_key(k));
    }
    assert_eq!(m.put("a".to_string(), ()), Put::Inserted);
    assert_eq!(m.len(), 1);
}

// Test: release accounting across the whole lifecycle.
// Assumes: release hooks receive ownership of every key/value the table
// gives up. Verifies: overwrite releases the old value and the surplus
// key; remove and clear release entries; resize releases nothing; drop
// releases whatever is left.
#[test]
fn release_hooks_see_every_key_and_value_once() {
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let (lk, lv) = (log.clone(), log.clone());
    let mut m = TableBuilder::new()
        .capacity(3)
        .release_key(move |k: String| lk.borrow_mut().push(format!("key:{k}")))
        .release_value(move |v: u32| lv.borrow_mut().push(format!("value:{v}")))
        .build()
        .unwrap();

    m.put("a".to_string(), 1);
    m.put("b".to_string(), 2);
    m.put("c".to_string(), 3);
    assert!(log.borrow().is_empty());

    m.put("a".to_string(), 10);
    assert_eq!(*log.borrow(), ["value:1", "key:a"]);

    m.resize(11).unwrap();
    assert_eq!(log.borrow().len(), 2);

    assert!(m.remove("b"));
    assert_eq!(log.borrow()[2..], ["key:b", "value:2"]);
    assert!(!m.remove("b"));
    assert_eq!(log.borrow().len(), 4);

    drop(m);
    let mut tail: Vec<String> = log.borrow()[4..].to_vec();
    tail.sort();
    assert_eq!(tail, ["key:a", "key:c", "value:10", "value:3"]);
}

// Test: default release drops owned values exactly once.
#[test]
fn default_release_drops_values() {
    let v = Rc::new(());
    let mut m = ChainedTable::new(2).unwrap();
    m.put(1u8, v.clone());
    m.put(2u8, v.clone());
    m.put(1u8, v.clone());
    assert_eq!(Rc::strong_count(&v), 3);
    m.remove(&2);
    assert_eq!(Rc::strong_count(&v), 2);
    drop(m);
    assert_eq!(Rc::strong_count(&v), 1);
}

#[test]
fn absent_tables_are_tolerated() {
    let none: Option<StringTable<u8>> = None;
    assert_eq!(ChainedTable::len_of(none.as_ref()), 0);
    drop(none);

    let mut some = Some(ChainedTable::<u8, u8>::new(1).unwrap());
    if let Some(t) = some.as_mut() {
        t.put(9, 9);
    }
    assert_eq!(ChainedTable::len_of(some.as_ref()), 1);
    if let Some(t) = some.take() {
        t.destroy();
    }
    assert_eq!(ChainedTable::len_of(some.as_ref()), 0);
}

#[test]
fn zero_capacity_string_table_rejected() {
    let r: Result<StringTable<u8>, TableError> = ChainedTable::string_keyed(0);
    match r {
        Err(TableError::ZeroCapacity) => {}
        other => panic!("unexpected result: {:?}", other.map(|t| t.len())),
    }
}
