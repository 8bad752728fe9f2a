#![no_main]

use libfuzzer_sys::fuzz_target;

use goscan::eligibility::check_file_name;
use goscan::BuildConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        let config = BuildConfig::new("darwin", "arm64", 21);
        let _ = check_file_name(name, &config);
    }
});
