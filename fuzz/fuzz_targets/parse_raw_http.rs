#![no_main]

use libfuzzer_sys::fuzz_target;
use reqplay::parser::DefinitionParser;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(model) = DefinitionParser::parse_raw_http(input, "fuzz") {
            assert!(!model.url.is_empty());
            assert!(model.body.is_some());
            assert!(model.headers.keys().all(|name| !name.is_empty()));
        }
    }
});
