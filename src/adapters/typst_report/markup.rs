//! Escaping plain text into Typst markup.

/// Characters Typst treats as markup anywhere in a line.
const SPECIAL: &[char] = &['\\', '#', '*', '_', '$', '@', '<', '>', '[', ']', '`', '~', '/'];

/// Characters that only mean something at the start of a line.
const LINE_START: &[char] = &['=', '+', '-'];

/// Escape inline text so it renders literally.
pub fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a multi-line body. Lines starting with `- ` (after any indentation)
/// stay bullet items so nested lists keep their shape.
pub fn escape_body(body: &str) -> String {
    body.lines()
        .map(escape_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_line(line: &str) -> String {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];

    if let Some(item) = trimmed.strip_prefix("- ") {
        return format!("{indent}- {}", escape_inline(item));
    }

    let escaped = escape_inline(trimmed);
    if trimmed.starts_with(LINE_START) {
        format!("{indent}\\{escaped}")
    } else {
        format!("{indent}{escaped}")
    }
}

/// Quote a value as a Typst string literal.
pub fn string_literal(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
