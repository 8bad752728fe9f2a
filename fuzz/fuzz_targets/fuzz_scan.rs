#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Scanning arbitrary source must never panic
    let content = String::from_utf8_lossy(data);
    let facts = goscan::scan(&content);
    assert_eq!(facts, goscan::scan(&content));
});
