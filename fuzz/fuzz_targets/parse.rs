#![no_main]

use libfuzzer_sys::fuzz_target;
use pytest_discovery_core::{execution_path, fully_qualified_name_from_id, parse_runner_id, parse_source};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the source splitter
        if let Ok(location) = parse_source(s) {
            // If it splits, the path must feed the execution path builder without panicking
            let _ = execution_path(location.path, s);
        }
        let _ = parse_runner_id(s);
        let _ = fully_qualified_name_from_id(s);
    }
});
