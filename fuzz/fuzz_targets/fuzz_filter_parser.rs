#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use xbase_core::query::Filter;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string (ignore invalid UTF-8)
    if let Ok(text) = std::str::from_utf8(data) {
        // Limit filter length to prevent timeout
        if text.len() > 10_000 {
            return;
        }

        // Parsing and evaluation must never panic
        if let Ok(filter) = Filter::parse(text) {
            let mut record = HashMap::new();
            record.insert("ID".to_string(), "1001".to_string());
            record.insert("NAME".to_string(), "ALICE".to_string());
            record.insert("QTY".to_string(), " 12 ".to_string());
            let _ = filter.matches(&record);
        }
    }
});
