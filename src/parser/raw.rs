use crate::error::ParseError;
use crate::request::{Headers, RequestModel};

/// Tried in order; the first separator that splits the text wins.
const LINE_SEPARATORS: [&str; 2] = ["\n", "\r\n"];

/// Parses a raw HTTP request (start line, header block, body).
///
/// The HTTP version on the start line is ignored. A `\r` left over from CRLF
/// line endings is treated as trailing whitespace.
///
/// # Errors
///
/// Returns an error when the text has no line break, when the start line
/// lacks a method or URL, or when the method is not a supported verb.
pub(crate) fn parse_raw_http(text: &str, tag: &str) -> Result<RequestModel, ParseError> {
    let (start_line, rest) = LINE_SEPARATORS
        .iter()
        .find_map(|separator| text.split_once(separator))
        .ok_or(ParseError::MissingLineBreak)?;

    let mut tokens = start_line.split_whitespace();
    let (Some(method), Some(url)) = (tokens.next(), tokens.next()) else {
        return Err(ParseError::IncompleteStartLine {
            line: start_line.trim_end().to_owned(),
        });
    };

    let (headers, body) = parse_message(rest);
    Ok(RequestModel {
        method: method.parse()?,
        url: url.to_owned(),
        headers,
        body: Some(body.to_owned()),
        tag: tag.to_owned(),
    })
}

/// Reads `Name: value` lines up to the first blank line; the rest is the body.
///
/// Indented lines continue the previous header. A line that is not a header
/// ends the block early and becomes the first line of the body.
fn parse_message(message: &str) -> (Headers, &str) {
    let mut headers = Headers::new();
    let mut previous: Option<String> = None;
    let mut offset = 0usize;

    for line in message.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        let line_end = offset.saturating_add(line.len());

        if content.is_empty() {
            return (headers, message.get(line_end..).unwrap_or_default());
        }

        if content.starts_with([' ', '\t']) {
            if let Some(value) = previous.as_ref().and_then(|name| headers.get_mut(name)) {
                let folded = content.trim();
                if !folded.is_empty() {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(folded);
                }
                offset = line_end;
                continue;
            }
            return (headers, message.get(offset..).unwrap_or_default());
        }

        let Some((name, value)) = header_field(content) else {
            return (headers, message.get(offset..).unwrap_or_default());
        };
        headers.insert(name.to_owned(), value.to_owned());
        previous = Some(name.to_owned());
        offset = line_end;
    }

    (headers, "")
}

fn header_field(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some((name, value.trim()))
}
