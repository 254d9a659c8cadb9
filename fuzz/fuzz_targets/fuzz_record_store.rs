#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rowlite::{fold_key, Record, RecordStore, StoreConfig};

#[derive(Arbitrary, Debug)]
enum StoreOp {
    Insert { id: i8, last: String },
    Delete { id: i8 },
    Find { id: i8 },
    Range { lo: i8, hi: i8 },
    Prefix { prefix: String },
    Compact,
}

fuzz_target!(|input: (bool, Vec<StoreOp>)| {
    let (reject, ops) = input;
    let config = if reject {
        StoreConfig::rejecting_duplicates()
    } else {
        StoreConfig::default()
    };
    let mut store = RecordStore::with_config(config);

    for op in ops.iter().take(500) {
        match op {
            StoreOp::Insert { id, last } => {
                if last.len() <= 64 {
                    let _ = store.insert_record(Record::new(i64::from(*id), "f", last.as_str()));
                }
            }
            StoreOp::Delete { id } => {
                let id = i64::from(*id);
                if store.delete_by_id(id) {
                    assert!(store.find_by_id(id).value.is_none());
                }
            }
            StoreOp::Find { id } => {
                if let Some(record) = store.find_by_id(i64::from(*id)).value {
                    assert_eq!(record.id, i64::from(*id));
                    assert!(!record.deleted);
                }
            }
            StoreOp::Range { lo, hi } => {
                let (lo, hi) = (i64::from(*lo), i64::from(*hi));
                let records = store.range_by_id(lo, hi).value;
                assert!(records.iter().all(|r| !r.deleted && lo <= r.id && r.id <= hi));
                assert!(records.windows(2).all(|w| w[0].id < w[1].id));
            }
            StoreOp::Prefix { prefix } => {
                if prefix.len() <= 16 {
                    let lower = fold_key(prefix);
                    for record in store.prefix_by_last(prefix).value {
                        assert!(!record.deleted);
                        assert!(fold_key(&record.last).starts_with(&lower));
                    }
                }
            }
            StoreOp::Compact => {
                store.compact_postings();
                assert_eq!(store.stats().stale_postings, 0);
            }
        }
    }
});
