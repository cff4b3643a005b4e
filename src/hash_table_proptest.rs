#![cfg(test)]

// Property tests for the chained table kept inside the crate so random
// operation sequences can run the structural invariant checker after every
// step.

use core::hash::Hasher;
use std::collections::HashMap;

use proptest::prelude::*;
use siphasher::sip::SipHasher;

use crate::hash_table::Entry;
use crate::hash_table::HashTable;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, i32),
    Remove(u8),
    Find(u8),
    Iterate,
    Reserve(u16),
    Clear,
    Retain(u8),
}

// A 24-key space over at most 80 ops keeps remove/reinsert hitting the same
// slots, so the free list and chain relinking get constant traffic.
fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        10 => (0u8..24, any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        5 => (0u8..24).prop_map(Op::Remove),
        5 => (0u8..24).prop_map(Op::Find),
        2 => Just(Op::Iterate),
        1 => (0u16..200).prop_map(Op::Reserve),
        1 => Just(Op::Clear),
        1 => (1u8..4).prop_map(Op::Retain),
    ];
    proptest::collection::vec(op, 1..80)
}

fn exercise(ops: Vec<Op>, hash: impl Fn(u64) -> u64) -> Result<(), TestCaseError> {
    let mut table: HashTable<(u64, i32)> = HashTable::with_capacity(0);
    let mut model: HashMap<u64, i32> = HashMap::new();

    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let key = u64::from(k);
                let present = model.contains_key(&key);
                match table.entry(hash(key), |(existing, _)| *existing == key) {
                    Entry::Occupied(mut entry) => {
                        prop_assert!(present, "occupied entry for a key the model lacks");
                        entry.get_mut().1 = v;
                    }
                    Entry::Vacant(entry) => {
                        prop_assert!(!present, "vacant entry for a key the model has");
                        entry.insert((key, v));
                    }
                }
                model.insert(key, v);
            }
            Op::Remove(k) => {
                let key = u64::from(k);
                let removed = table.remove(hash(key), |(existing, _)| *existing == key);
                let expected = model.remove(&key);
                prop_assert_eq!(removed.map(|(_, v)| v), expected);
            }
            Op::Find(k) => {
                let key = u64::from(k);
                let found = table.find(hash(key), |(existing, _)| *existing == key);
                prop_assert_eq!(found.map(|&(_, v)| v), model.get(&key).copied());
            }
            Op::Iterate => {
                let mut seen: Vec<(u64, i32)> = table.iter().copied().collect();
                seen.sort_unstable();
                let mut expected: Vec<(u64, i32)> = model.iter().map(|(&k, &v)| (k, v)).collect();
                expected.sort_unstable();
                prop_assert_eq!(seen, expected);
            }
            Op::Reserve(n) => {
                table.reserve(usize::from(n));
            }
            Op::Clear => {
                table.clear();
                model.clear();
            }
            Op::Retain(m) => {
                let modulus = i32::from(m) + 1;
                table.retain(|&mut (_, v)| v.rem_euclid(modulus) != 0);
                model.retain(|_, v| v.rem_euclid(modulus) != 0);
            }
        }

        table.assert_invariants();
        prop_assert_eq!(table.len(), model.len());
        prop_assert_eq!(table.is_empty(), model.is_empty());
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    // Seven distinct hash values force long chains, head and mid-chain
    // removals, and freed-slot reuse inside shared buckets.
    #[test]
    fn narrow_hashes_match_the_model(ops in arb_ops()) {
        exercise(ops, |key| key % 7)?;
    }

    // Well-distributed hashes cover growth and re-threading instead.
    #[test]
    fn spread_hashes_match_the_model(ops in arb_ops()) {
        exercise(ops, |key| {
            let mut hasher = SipHasher::new_with_keys(0x9e37_79b9, 0x7f4a_7c15);
            hasher.write_u64(key);
            hasher.finish()
        })?;
    }
}
