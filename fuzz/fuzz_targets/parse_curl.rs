#![no_main]

use libfuzzer_sys::fuzz_target;
use reqplay::parser::DefinitionParser;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parser = DefinitionParser::default();
        if let Ok(model) = parser.parse_curl(input.trim(), "fuzz") {
            assert!(!model.url.is_empty());
            assert!(!model.url.contains(char::is_whitespace));
        }
    }
});
