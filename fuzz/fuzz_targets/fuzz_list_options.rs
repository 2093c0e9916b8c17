#![no_main]

use libfuzzer_sys::fuzz_target;
use xbase_core::{Database, ListOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(args) = std::str::from_utf8(data) else {
        return;
    };
    if args.len() > 4096 {
        return;
    }

    let mut db = Database::new();
    let _ = db.use_table("CUSTOMERS");
    let _ = db.add_field("ID", "C", 4, 0);
    let _ = db.add_field("NAME", "C", 10, 0);
    let _ = db.add_record(vec!["1001".into(), "ALICE".into()]);
    let _ = db.add_record(vec!["1002".into(), "BOB".into()]);
    let _ = db.use_table("ORDERS");
    let _ = db.add_field("ID", "C", 4, 0);
    let _ = db.add_record(vec!["1002".into()]);
    let _ = db.set_relation("ID", "CUSTOMERS");

    let options = ListOptions::parse(args);
    if let Ok(output) = db.list(&options) {
        let _ = output.lines();
    }
});
