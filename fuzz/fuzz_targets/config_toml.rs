#![no_main]

use libfuzzer_sys::fuzz_target;
use reqplay::config::ConfigFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(config) = toml::from_str::<ConfigFile>(input) {
            let _ = config.plan_entries();
        }
    }
});
