#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(doc) = html::parse(input) {
        let visited = html::traverse::descendants(&doc, doc.root()).count();
        assert_eq!(visited, doc.len());
    }
});
