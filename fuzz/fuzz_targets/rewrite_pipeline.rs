#![no_main]

use libfuzzer_sys::fuzz_target;
use link_rewrite::{Outcome, ReplacementTable, rewrite_document};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let table = ReplacementTable::default();
    let Ok((findings, outcome)) = rewrite_document(input, &table) else {
        return;
    };
    for finding in &findings {
        assert!(!finding.href.is_empty());
    }
    if findings.is_empty() {
        assert_eq!(outcome, Outcome::Unchanged);
    }
});
