use super::*;
use crate::events::ReplayEvent;
use crate::request::{Headers, HttpMethod};

fn curl(text: &str) -> Result<RequestModel, String> {
    DefinitionParser::default()
        .parse(DefinitionKind::Curl, text, "tag")
        .map_err(|err| format!("curl parse failed: {}", err))
}

fn raw(text: &str) -> Result<RequestModel, String> {
    DefinitionParser::default()
        .parse(DefinitionKind::RawHttp, text, "tag")
        .map_err(|err| format!("raw parse failed: {}", err))
}

fn headers(pairs: &[(&str, &str)]) -> Headers {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

#[test]
fn kind_follows_file_extension() -> Result<(), String> {
    if DefinitionKind::from_path(Path::new("defs/login.http")) != DefinitionKind::RawHttp {
        return Err("Expected .http to be raw HTTP".to_owned());
    }
    for path in ["defs/login.curl", "defs/login.txt", "defs/login", "login.HTTP"] {
        if DefinitionKind::from_path(Path::new(path)) != DefinitionKind::Curl {
            return Err(format!("Expected {} to be curl", path));
        }
    }
    Ok(())
}

#[test]
fn curl_full_command() -> Result<(), String> {
    let model = curl(
        r#"curl -X POST 'https://api.example.com/x' -H 'Content-Type: application/json' -d '{"a":1}'"#,
    )?;
    let expected = RequestModel {
        method: HttpMethod::Post,
        url: "https://api.example.com/x".to_owned(),
        headers: headers(&[("Content-Type", "application/json")]),
        body: Some(r#"{"a":1}"#.to_owned()),
        tag: "tag".to_owned(),
    };
    if model != expected {
        return Err(format!("Unexpected model: {:?}", model));
    }
    Ok(())
}

#[test]
fn curl_without_method_flag_is_get() -> Result<(), String> {
    let model = curl("curl https://example.com/items")?;
    if model.method != HttpMethod::Get {
        return Err(format!("Expected GET, got {}", model.method));
    }
    if model.body.is_some() {
        return Err("Expected no body without a data flag".to_owned());
    }
    Ok(())
}

#[test]
fn curl_each_supported_verb() -> Result<(), String> {
    for method in [
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ] {
        let model = curl(&format!("curl -X {} https://example.com/", method))?;
        if model.method != method {
            return Err(format!("Expected {}, got {}", method, model.method));
        }
    }
    Ok(())
}

#[test]
fn curl_method_priority_beats_flag_order() -> Result<(), String> {
    let model = curl("curl -X DELETE https://example.com/ --request PUT")?;
    if model.method != HttpMethod::Put {
        return Err(format!("Expected PUT, got {}", model.method));
    }
    Ok(())
}

#[test]
fn curl_attached_method_and_header() -> Result<(), String> {
    let model = curl("curl -XPATCH -H'X-Trace: 7' https://example.com/")?;
    if model.method != HttpMethod::Patch {
        return Err(format!("Expected PATCH, got {}", model.method));
    }
    if model.headers != headers(&[("X-Trace", "7")]) {
        return Err(format!("Unexpected headers: {:?}", model.headers));
    }
    Ok(())
}

#[test]
fn curl_last_data_flag_wins() -> Result<(), String> {
    let model = curl(
        "curl https://example.com/ --data 'first' -d \"second\" --data-raw 'third=3&x=y'",
    )?;
    if model.body.as_deref() != Some("third=3&x=y") {
        return Err(format!("Unexpected body: {:?}", model.body));
    }
    Ok(())
}

#[test]
fn curl_empty_quoted_data_is_empty_body() -> Result<(), String> {
    let model = curl("curl -X POST https://example.com/ -d ''")?;
    if model.body.as_deref() != Some("") {
        return Err(format!("Unexpected body: {:?}", model.body));
    }
    Ok(())
}

#[test]
fn curl_strips_trailing_quote_from_url() -> Result<(), String> {
    let model = curl(r#"curl "https://example.com/a?b=1"'"#)?;
    if model.url != "https://example.com/a?b=1" {
        return Err(format!("Unexpected url: {}", model.url));
    }
    Ok(())
}

#[test]
fn curl_joins_line_continuations() -> Result<(), String> {
    let text = "curl 'https://example.com/v1/items' \\\n  -X PUT \\\r\n  -H 'Accept: */*' \\\n  -H 'Authorization: Bearer abc:def'";
    let model = curl(text)?;
    if model.url != "https://example.com/v1/items" {
        return Err(format!("Unexpected url: {}", model.url));
    }
    if model.method != HttpMethod::Put {
        return Err(format!("Expected PUT, got {}", model.method));
    }
    let expected = headers(&[("Accept", "*/*"), ("Authorization", "Bearer abc:def")]);
    if model.headers != expected {
        return Err(format!("Unexpected headers: {:?}", model.headers));
    }
    Ok(())
}

#[test]
fn curl_data_value_is_not_read_as_flags() -> Result<(), String> {
    let model = curl("curl https://example.com/ -d '-X DELETE -H x'")?;
    if model.method != HttpMethod::Get {
        return Err(format!("Expected GET, got {}", model.method));
    }
    if !model.headers.is_empty() {
        return Err(format!("Unexpected headers: {:?}", model.headers));
    }
    Ok(())
}

#[test]
fn curl_without_url_fails() -> Result<(), String> {
    match DefinitionParser::default().parse_curl("curl -X POST -d 'x'", "tag") {
        Err(ParseError::MissingUrl) => Ok(()),
        other => Err(format!("Expected MissingUrl, got {:?}", other)),
    }
}

#[test]
fn curl_malformed_header_is_skipped_with_event() -> Result<(), String> {
    let (events, mut rx) = EventSink::channel();
    let parser = DefinitionParser::new(events);
    let model = parser
        .parse_curl("curl https://example.com/ -H 'NoColon' -H 'Ok: 1'", "login")
        .map_err(|err| format!("curl parse failed: {}", err))?;
    if model.headers != headers(&[("Ok", "1")]) {
        return Err(format!("Unexpected headers: {:?}", model.headers));
    }
    match rx.try_recv() {
        Ok(ReplayEvent::MalformedHeader { tag, header }) if tag == "login" && header == "NoColon" => {
            Ok(())
        }
        other => Err(format!("Expected MalformedHeader event, got {:?}", other)),
    }
}

#[test]
fn raw_basic_request() -> Result<(), String> {
    let model = raw("GET /ping HTTP/1.1\nHost: example.com\n\n")?;
    let expected = RequestModel {
        method: HttpMethod::Get,
        url: "/ping".to_owned(),
        headers: headers(&[("Host", "example.com")]),
        body: Some(String::new()),
        tag: "tag".to_owned(),
    };
    if model != expected {
        return Err(format!("Unexpected model: {:?}", model));
    }
    Ok(())
}

#[test]
fn raw_crlf_request_with_body() -> Result<(), String> {
    let model = raw(
        "POST https://example.com/api HTTP/1.1\r\nHost: example.com\r\nContent-Type: text/plain\r\n\r\nline one\r\nline two",
    )?;
    if model.method != HttpMethod::Post || model.url != "https://example.com/api" {
        return Err(format!("Unexpected start line: {} {}", model.method, model.url));
    }
    let expected = headers(&[("Content-Type", "text/plain"), ("Host", "example.com")]);
    if model.headers != expected {
        return Err(format!("Unexpected headers: {:?}", model.headers));
    }
    if model.body.as_deref() != Some("line one\r\nline two") {
        return Err(format!("Unexpected body: {:?}", model.body));
    }
    Ok(())
}

#[test]
fn raw_header_names_keep_case_and_last_duplicate_wins() -> Result<(), String> {
    let model = raw("PUT /a HTTP/1.1\nx-custom: 1\nX-Custom: 2\nx-custom: 3\n\n")?;
    let expected = headers(&[("X-Custom", "2"), ("x-custom", "3")]);
    if model.headers != expected {
        return Err(format!("Unexpected headers: {:?}", model.headers));
    }
    Ok(())
}

#[test]
fn raw_folded_header_is_joined() -> Result<(), String> {
    let model = raw("GET /a HTTP/1.1\nX-Long: part one\n  part two\nHost: h\n\n")?;
    if model.headers.get("X-Long").map(String::as_str) != Some("part one part two") {
        return Err(format!("Unexpected headers: {:?}", model.headers));
    }
    Ok(())
}

#[test]
fn raw_non_header_line_starts_body() -> Result<(), String> {
    let model = raw("POST /a HTTP/1.1\nHost: h\nname=value&x=1\n")?;
    if model.headers != headers(&[("Host", "h")]) {
        return Err(format!("Unexpected headers: {:?}", model.headers));
    }
    if model.body.as_deref() != Some("name=value&x=1\n") {
        return Err(format!("Unexpected body: {:?}", model.body));
    }
    Ok(())
}

#[test]
fn raw_lowercase_method_is_accepted() -> Result<(), String> {
    let model = raw("delete /items/3 HTTP/1.1\n\n")?;
    if model.method != HttpMethod::Delete {
        return Err(format!("Expected DELETE, got {}", model.method));
    }
    Ok(())
}

#[test]
fn raw_without_line_break_fails() -> Result<(), String> {
    match DefinitionParser::parse_raw_http("GET /ping HTTP/1.1", "tag") {
        Err(ParseError::MissingLineBreak) => Ok(()),
        other => Err(format!("Expected MissingLineBreak, got {:?}", other)),
    }
}

#[test]
fn raw_start_line_needs_method_and_url() -> Result<(), String> {
    match DefinitionParser::parse_raw_http("GET\nHost: example.com\n\n", "tag") {
        Err(ParseError::IncompleteStartLine { line }) if line == "GET" => Ok(()),
        other => Err(format!("Expected IncompleteStartLine, got {:?}", other)),
    }
}

#[test]
fn raw_unknown_method_fails() -> Result<(), String> {
    match DefinitionParser::parse_raw_http("BREW /pot HTTP/1.1\n\n", "tag") {
        Err(ParseError::UnknownMethod { method }) if method == "BREW" => Ok(()),
        other => Err(format!("Expected UnknownMethod, got {:?}", other)),
    }
}

#[test]
fn raw_headers_and_body_survive_reserialization() -> Result<(), String> {
    let cases = [
        (
            headers(&[("Accept", "*/*"), ("Host", "example.com")]),
            "{\"id\": 1}".to_owned(),
        ),
        (
            headers(&[("X-Empty", ""), ("Cookie", "a=1; b=2"), ("Host", "h:8080")]),
            "first\n\nthird".to_owned(),
        ),
        (headers(&[("Host", "example.com")]), String::new()),
    ];

    for (expected_headers, expected_body) in cases {
        let mut text = "POST /submit HTTP/1.1\n".to_owned();
        for (name, value) in &expected_headers {
            text.push_str(&format!("{}: {}\n", name, value));
        }
        text.push('\n');
        text.push_str(&expected_body);

        let model = raw(&text)?;
        if model.headers != expected_headers {
            return Err(format!("Unexpected headers: {:?}", model.headers));
        }
        if model.body.as_deref() != Some(expected_body.as_str()) {
            return Err(format!("Unexpected body: {:?}", model.body));
        }
    }
    Ok(())
}
