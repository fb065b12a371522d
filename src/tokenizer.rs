//! Quote-aware splitting of `key=value` log lines.

/// Split `line` into space-separated tokens.
///
/// A `"` opens a quoted region in which spaces do not split and `\` escapes
/// the following character; an unescaped `"` closes it. Tokens are returned
/// verbatim, quotes and escapes included. An unterminated quote runs to the
/// end of the line.
pub fn tokenize(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::with_capacity(16);
    let mut start: Option<usize> = None;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, &c) in bytes.iter().enumerate() {
        let Some(begin) = start else {
            if c == b' ' {
                continue;
            }
            start = Some(i);
            in_quotes = c == b'"';
            continue;
        };

        if in_quotes {
            if escaped {
                escaped = false;
            } else if c == b'\\' {
                escaped = true;
            } else if c == b'"' {
                in_quotes = false;
            }
            continue;
        }

        match c {
            b'"' => in_quotes = true,
            b' ' => {
                // Only ASCII bytes are split on, so both ends are char boundaries.
                tokens.push(&line[begin..i]);
                start = None;
            }
            _ => {}
        }
    }

    if let Some(begin) = start {
        tokens.push(&line[begin..]);
    }
    tokens
}
