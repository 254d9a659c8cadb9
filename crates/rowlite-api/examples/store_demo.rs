use rowlite::logging::LogConfig;
use rowlite::{Record, RecordStore};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Trace level shows the comparison count of every query
    let _guard = LogConfig::trace().init()?;

    let mut store = RecordStore::new();
    let students = [
        (1001, "Ada", "Lovelace", "Mathematics", 3.9),
        (1002, "Alan", "Turing", "Computer Science", 3.8),
        (1003, "Grace", "Hopper", "Computer Science", 3.7),
        (1004, "Tim", "Lovell", "Physics", 3.2),
        (1005, "Linus", "Torvalds", "Computer Science", 3.4),
    ];
    for (id, first, last, major, gpa) in students {
        store.insert_record(Record::new(id, first, last).with_major(major).with_gpa(gpa))?;
    }
    info!(records = store.heap_len(), "Loaded students");

    let hit = store.find_by_id(1003);
    if let Some(record) = hit.value {
        println!("{} {} ({} comparisons)", record.first, record.last, hit.comparisons);
    }

    let range = store.range_by_id(1002, 1004);
    println!("ids 1002..=1004: {} records, {} comparisons", range.value.len(), range.comparisons);

    store.delete_by_id(1004);
    let prefix = store.prefix_by_last("LOV");
    for record in &prefix.value {
        println!("prefix 'LOV': {} {}", record.first, record.last);
    }

    let stats = store.stats();
    info!(
        live = stats.live_records,
        deleted = stats.deleted_records,
        stale_postings = stats.stale_postings,
        "Store statistics"
    );
    Ok(())
}
