#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check the
// structural invariants after every step.

use crate::error::InsertError;
use crate::hash::KeyHasher;
use crate::hash_table::HashTable;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Replace(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Replace(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

/// Applies one op to both the table and the model, asserting agreement.
fn step<H: KeyHasher>(
    sut: &mut HashTable<i32, H>,
    model: &mut HashMap<String, i32>,
    pool: &[String],
    op: OpI,
) -> Result<(), TestCaseError> {
    match op {
        OpI::Put(i, v) => {
            let k = &pool[i];
            let already = model.contains_key(k);
            match sut.put(k, v) {
                Ok(()) => {
                    prop_assert!(!already, "put must fail on duplicate");
                    model.insert(k.clone(), v);
                }
                Err(InsertError::DuplicateKey) => {
                    prop_assert!(already, "duplicate error only when key exists");
                }
                Err(e) => prop_assert!(false, "unexpected error: {e}"),
            }
        }
        OpI::Replace(i, v) => {
            let k = &pool[i];
            let prev = sut.replace(k, v);
            let expected = model.get_mut(k).map(|mv| core::mem::replace(mv, v));
            prop_assert_eq!(prev, expected);
        }
        OpI::Remove(i) => {
            let k = &pool[i];
            prop_assert_eq!(sut.remove(k), model.remove(k));
            prop_assert!(!sut.contains(k));
        }
        OpI::Get(i) => {
            let k = &pool[i];
            prop_assert_eq!(sut.get(k), model.get(k));
        }
        OpI::Contains(s) => {
            prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
        }
        OpI::Mutate(i, d) => {
            let k = &pool[i];
            match (sut.get_mut(k), model.get_mut(k)) {
                (Some(sv), Some(mv)) => {
                    *sv = sv.saturating_add(d);
                    *mv = mv.saturating_add(d);
                }
                (None, None) => {}
                (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
            }
        }
        OpI::Iterate => {
            let mut seen = BTreeMap::new();
            sut.for_each(|k, v| {
                seen.insert(k.to_string(), *v);
            });
            prop_assert_eq!(seen.len(), sut.len(), "each binding visited once");
            let expected: BTreeMap<_, _> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
            prop_assert_eq!(seen, expected);
        }
    }
    sut.assert_invariants();
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate puts are rejected; replace/remove on a miss change nothing.
// - get/contains parity with the model; get_mut edits are observed later.
// - for_each yields each live binding exactly once.
// - Every binding sits in its hashed bucket; len equals total chain length.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: HashTable<i32> = HashTable::new();
        let mut model: HashMap<String, i32> = HashMap::new();
        for op in ops {
            step(&mut sut, &mut model, &pool, op)?;
        }
    }
}

// Collision variant using a constant hasher to stress chain walking.
#[derive(Clone, Copy, Default)]
struct ConstHasher;
impl KeyHasher for ConstHasher {
    fn hash_bytes(&self, _bytes: &[u8]) -> u64 {
        0
    }
}

// Property: Same state-machine invariants as above, with every key in one
// chain. Exercises unlinking at the head, middle and tail of a chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: HashTable<i32, ConstHasher> = HashTable::with_hasher(ConstHasher);
        let mut model: HashMap<String, i32> = HashMap::new();
        for op in ops {
            step(&mut sut, &mut model, &pool, op)?;
        }
    }
}

// Property: resize transparency. Bulk inserts push the table through several
// growth stages while interleaved removals and lookups keep agreeing with
// the model.
proptest! {
    #![proptest_config(ProptestConfig { cases: 8, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_is_transparent(
        n in 2_000usize..6_000,
        remove_every in 2usize..7,
    ) {
        let mut sut: HashTable<usize> = HashTable::new();
        let mut model: HashMap<String, usize> = HashMap::new();
        for i in 0..n {
            let k = format!("g{i}");
            prop_assert!(sut.put(&k, i).is_ok());
            model.insert(k, i);
            if i % remove_every == 0 {
                let victim = format!("g{}", i / 2);
                prop_assert_eq!(sut.remove(&victim), model.remove(&victim));
            }
        }
        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert!(sut.capacity() >= crate::growth::GROWTH_TABLE[1]);
        for (k, v) in &model {
            prop_assert_eq!(sut.get(k), Some(v));
        }
        for i in n..n + 100 {
            let absent = format!("g{i}");
            prop_assert!(!sut.contains(&absent));
        }
    }
}
