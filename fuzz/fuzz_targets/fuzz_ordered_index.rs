#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rowlite_core::OrderedIndex;
use std::collections::BTreeMap;

#[derive(Arbitrary, Debug)]
enum IndexOp {
    Insert { key: i16, value: u32 },
    Erase { key: i16 },
    Find { key: i16 },
    Range { lo: i16, hi: i16 },
}

fuzz_target!(|ops: Vec<IndexOp>| {
    let mut index = OrderedIndex::new();
    let mut model = BTreeMap::new();

    for op in ops.iter().take(2000) {
        match *op {
            IndexOp::Insert { key, value } => {
                assert_eq!(index.insert(key, value), model.insert(key, value));
            }
            IndexOp::Erase { key } => {
                assert_eq!(index.erase(&key), model.remove(&key).is_some());
            }
            IndexOp::Find { key } => {
                index.reset_metrics();
                assert_eq!(index.find(&key), model.get(&key));
                assert!(index.comparisons() <= u64::from(index.height()));
            }
            IndexOp::Range { lo, hi } => {
                let mut seen = Vec::new();
                index.range_apply(&lo, &hi, |k, v| seen.push((*k, *v)));
                let expected: Vec<_> = if lo <= hi {
                    model.range(lo..=hi).map(|(k, v)| (*k, *v)).collect()
                } else {
                    Vec::new()
                };
                assert_eq!(seen, expected);
            }
        }
    }

    assert_eq!(index.len(), model.len());
    assert!(index.iter().map(|(k, v)| (*k, *v)).eq(model.into_iter()));
});
