#![no_main]

use libfuzzer_sys::fuzz_target;
use xbase_core::{Database, ListOptions};
use xbase_snapshot::SnapshotFormat;

fuzz_target!(|data: &[u8]| {
    for format in [SnapshotFormat::Json, SnapshotFormat::Binary] {
        // Decoding arbitrary bytes must fail cleanly, never panic
        if let Ok(image) = format.decode(data) {
            let mut db = Database::from(image);
            let names: Vec<String> = db.tables().iter().map(|t| t.name().to_string()).collect();
            for name in names.iter().take(8) {
                if db.use_table(name).is_ok() {
                    let _ = db.list(&ListOptions::new().all());
                }
            }
        }
    }
});
