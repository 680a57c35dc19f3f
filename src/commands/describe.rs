//! Extraction of a unit's documentation text from its source header

const DOCSTRING_DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// Returns the documentation text of a unit source, if it has any.
///
/// The text is either a leading comment block (`#` or `//` lines) or a
/// leading docstring (`"""` / `'''`), read after an optional `#!` line and
/// any blank lines.
#[must_use]
pub fn extract_description(source: &str) -> Option<String> {
    let mut lines = source.lines().peekable();
    if lines.peek().is_some_and(|line| line.starts_with("#!")) {
        lines.next();
    }
    while lines.peek().is_some_and(|line| line.trim().is_empty()) {
        lines.next();
    }

    let first = lines.peek().copied()?.trim_start();
    let text = match DOCSTRING_DELIMITERS
        .into_iter()
        .find(|delim| first.starts_with(delim))
    {
        Some(delim) => docstring(lines, delim),
        None => comment_block(lines),
    };

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn docstring<'a>(mut lines: impl Iterator<Item = &'a str>, delim: &str) -> String {
    let Some(first) = lines.next() else {
        return String::new();
    };
    let opening = &first.trim_start()[delim.len()..];
    if let Some(end) = opening.find(delim) {
        return opening[..end].to_string();
    }

    let mut text = vec![opening];
    for line in lines {
        if let Some(end) = line.find(delim) {
            text.push(&line[..end]);
            break;
        }
        text.push(line.trim_end());
    }
    text.join("\n")
}

fn comment_block<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines
        .map(str::trim_start)
        .map_while(strip_comment_marker)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_comment_marker(line: &str) -> Option<&str> {
    if line.starts_with("#!") {
        return None;
    }
    let body = if let Some(rest) = line.strip_prefix("//") {
        rest.trim_start_matches('/')
    } else {
        line.strip_prefix('#')?.trim_start_matches('#')
    };
    Some(body.strip_prefix(' ').unwrap_or(body).trim_end())
}
