//! Minimal CSV line handling for the two fixed observatory feeds.
//!
//! The feeds are plain comma-separated text with an optional UTF-8 BOM and
//! occasional double-quoted fields, so a small dedicated splitter covers
//! them without a parsing dependency.

/// Strip a leading UTF-8 byte order mark.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Split one CSV record, honouring double quotes and `""` escapes.
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Index of a required header column.
pub fn column_index(header: &[String], name: &str) -> Option<usize> {
    header.iter().position(|h| h.trim() == name)
}
