#![no_main]

use libfuzzer_sys::fuzz_target;
use reqplay::config::ConfigFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<ConfigFile>(data) {
        let _ = config.plan_entries();
    }
});
