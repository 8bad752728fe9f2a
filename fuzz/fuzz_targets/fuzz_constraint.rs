#![no_main]

use libfuzzer_sys::fuzz_target;

use goscan::{evaluate, BuildConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let tags = BuildConfig::new("linux", "amd64", 21)
            .with_tags(["wolf"])
            .tag_set();
        let lines: Vec<&str> = content.lines().collect();
        let _ = evaluate(&lines, &tags);
    }
});
