/// One shell word with quotes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Word {
    pub(super) text: String,
    pub(super) quoted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Splits command text into words the way a POSIX shell would.
///
/// Single quotes are literal, double quotes honour `\"`, `\\`, `\$` and
/// `` \` ``, and a backslash outside quotes escapes the next character. An
/// unterminated quote runs to the end of the input.
pub(super) fn split_words(input: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    let mut quote = Quote::None;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match quote {
            Quote::Single => {
                if ch == '\'' {
                    quote = Quote::None;
                } else {
                    current.push(ch);
                }
            }
            Quote::Double => match ch {
                '"' => quote = Quote::None,
                '\\' => match chars.peek().copied() {
                    Some(next @ ('"' | '\\' | '$' | '`')) => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push(ch),
                },
                _ => current.push(ch),
            },
            Quote::None => match ch {
                '\'' => {
                    quote = Quote::Single;
                    in_word = true;
                    quoted = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_word = true;
                    quoted = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_word = true;
                }
                ch if ch.is_whitespace() => {
                    if in_word {
                        words.push(Word {
                            text: std::mem::take(&mut current),
                            quoted,
                        });
                        in_word = false;
                        quoted = false;
                    }
                }
                _ => {
                    current.push(ch);
                    in_word = true;
                }
            },
        }
    }

    if in_word {
        words.push(Word {
            text: current,
            quoted,
        });
    }
    words
}
