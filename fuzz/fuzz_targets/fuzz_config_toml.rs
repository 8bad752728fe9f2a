#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz TOML config parsing - this should never panic
        if let Ok(config) = toml::from_str::<goscan::BuildConfig>(content) {
            let _ = config.validate();
            let _ = config.tags_flag();
        }
    }
});
