use crate::error::ParseError;
use crate::events::{EventSink, ReplayEvent};
use crate::request::{Headers, HttpMethod, RequestModel, split_header_line};

use super::shell_words::{Word, split_words};

/// `-X` verbs in the order they are checked; the first one present wins.
const METHOD_PRIORITY: [HttpMethod; 6] = [
    HttpMethod::Post,
    HttpMethod::Put,
    HttpMethod::Delete,
    HttpMethod::Patch,
    HttpMethod::Head,
    HttpMethod::Options,
];

const DATA_FLAGS: [&str; 4] = ["--data", "--data-raw", "--data-binary", "--data-ascii"];

/// Flags whose value is the following word and must not be read as a flag.
const VALUE_FLAGS: [&str; 16] = [
    "-A",
    "-b",
    "-e",
    "-F",
    "-m",
    "-o",
    "-u",
    "-x",
    "--url",
    "--user",
    "--user-agent",
    "--referer",
    "--cookie",
    "--form",
    "--output",
    "--proxy",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Method,
    Header,
    Data,
    Other,
}

/// Parses a curl command line into a [`RequestModel`].
///
/// # Errors
///
/// Returns [`ParseError::MissingUrl`] when no `scheme://` URL appears in the
/// command. Nothing else is extracted in that case.
pub(crate) fn parse_curl(
    text: &str,
    tag: &str,
    events: &EventSink,
) -> Result<RequestModel, ParseError> {
    let command = join_continuations(text);
    let url = extract_url(&command).ok_or(ParseError::MissingUrl)?;

    let mut verbs: Vec<String> = Vec::new();
    let mut headers = Headers::new();
    let mut body: Option<String> = None;

    for (flag, value) in flag_values(&split_words(&command)) {
        match flag {
            Flag::Method => verbs.push(value.text.trim().to_ascii_uppercase()),
            Flag::Header if value.quoted => match split_header_line(&value.text) {
                Some((name, header_value)) => {
                    headers.insert(name, header_value);
                }
                None => events.emit(ReplayEvent::MalformedHeader {
                    tag: tag.to_owned(),
                    header: value.text.clone(),
                }),
            },
            Flag::Data if value.quoted => body = Some(value.text.clone()),
            Flag::Header | Flag::Data | Flag::Other => {}
        }
    }

    Ok(RequestModel {
        method: select_method(&verbs),
        url,
        headers,
        body,
        tag: tag.to_owned(),
    })
}

/// Collapses backslash line continuations into single spaces.
fn join_continuations(text: &str) -> String {
    text.replace("\\\r\n", " ")
        .replace("\\\n", " ")
        .trim()
        .to_owned()
}

/// Finds the first `scheme://non-whitespace` run and cuts it at the first
/// quote character, dropping the stray closing quote of a quoted URL.
fn extract_url(command: &str) -> Option<String> {
    let mut search_from = 0usize;
    while let Some(found) = command.get(search_from..).and_then(|rest| rest.find("://")) {
        let separator = search_from.saturating_add(found);
        let after_separator = separator.saturating_add("://".len());
        search_from = after_separator;

        let before = command.get(..separator)?;
        let scheme_start = before
            .char_indices()
            .rev()
            .take_while(|(_, ch)| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'))
            .last()
            .map_or(separator, |(index, _)| index);
        let Some(scheme_offset) = before
            .get(scheme_start..)
            .and_then(|scheme| scheme.find(|ch: char| ch.is_ascii_alphabetic()))
        else {
            continue;
        };
        let start = scheme_start.saturating_add(scheme_offset);

        let candidate = command.get(start..)?;
        let end = candidate
            .find(char::is_whitespace)
            .unwrap_or(candidate.len());
        let matched = candidate.get(..end)?;
        let url = matched
            .split(['\'', '"'])
            .next()
            .unwrap_or(matched)
            .trim_matches(['\'', '"']);
        return Some(url.to_owned());
    }
    None
}

/// Pairs each recognised flag with its value word, attached or separate.
fn flag_values(words: &[Word]) -> Vec<(Flag, Word)> {
    let mut pairs = Vec::new();
    let mut iter = words.iter();
    while let Some(word) = iter.next() {
        let Some((flag, attached)) = classify(&word.text) else {
            continue;
        };
        let value = match attached {
            Some(text) => Word {
                text: text.to_owned(),
                quoted: word.quoted,
            },
            None => match iter.next() {
                Some(next) => next.clone(),
                None => break,
            },
        };
        pairs.push((flag, value));
    }
    pairs
}

/// Recognises a flag word. Returns the flag kind and any value glued onto a
/// short flag (`-XPOST`, `-H'Accept: */*'`).
fn classify(text: &str) -> Option<(Flag, Option<&str>)> {
    match text {
        "-X" | "--request" => return Some((Flag::Method, None)),
        "-H" | "--header" => return Some((Flag::Header, None)),
        "-d" => return Some((Flag::Data, None)),
        _ => {}
    }
    if DATA_FLAGS.contains(&text) {
        return Some((Flag::Data, None));
    }
    if VALUE_FLAGS.contains(&text) {
        return Some((Flag::Other, None));
    }
    if text.starts_with("--") {
        return None;
    }
    if let Some(rest) = text.strip_prefix("-X").filter(|rest| !rest.is_empty()) {
        return Some((Flag::Method, Some(rest)));
    }
    if let Some(rest) = text.strip_prefix("-H").filter(|rest| !rest.is_empty()) {
        return Some((Flag::Header, Some(rest)));
    }
    if let Some(rest) = text.strip_prefix("-d").filter(|rest| !rest.is_empty()) {
        return Some((Flag::Data, Some(rest)));
    }
    None
}

fn select_method(verbs: &[String]) -> HttpMethod {
    METHOD_PRIORITY
        .into_iter()
        .find(|method| verbs.iter().any(|verb| verb == method.as_str()))
        .unwrap_or(HttpMethod::Get)
}
