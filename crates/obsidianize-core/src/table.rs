//! CSV table conversion
//!
//! Exported databases arrive as comma-delimited text. Their link cells are
//! fixed in place first, then the whole document is re-serialized as a
//! Markdown pipe-table written to a sibling `.md` file.

use crate::links::convert_relative_path;

/// Replace every cell containing a `.md` reference with its wiki-link form.
/// Returns the fixed content and the number of converted cells.
pub fn fix_csv_links(content: &str) -> (String, usize) {
    let mut links = 0usize;
    let lines: Vec<String> = content
        .split('\n')
        .map(|line| {
            line.split(',')
                .map(|cell| {
                    if cell.contains(".md") {
                        links += 1;
                        convert_relative_path(cell)
                    } else {
                        cell.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    (lines.join("\n"), links)
}

/// A comma becomes a pipe only when both neighbors are solid cell text.
/// Commas adjacent to another comma, whitespace, or the edges of the content
/// represent empty cells and stay as they are.
fn comma_becomes_pipe(chars: &[char], idx: usize) -> bool {
    let solid = |c: Option<&char>| matches!(c, Some(&c) if !c.is_whitespace() && c != ',');
    let prev = idx.checked_sub(1).and_then(|i| chars.get(i));
    solid(prev) && solid(chars.get(idx + 1))
}

/// Re-serialize comma-delimited content as a Markdown table: cell delimiters
/// become pipes and a `-|` header-separator row is inserted as line two, one
/// group per column of the first line.
pub fn csv_to_markdown(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut converted = String::with_capacity(content.len());
    for (idx, &c) in chars.iter().enumerate() {
        if c == ',' && comma_becomes_pipe(&chars, idx) {
            converted.push('|');
        } else {
            converted.push(c);
        }
    }

    // split always yields at least the first line, so index 1 is in bounds
    let mut lines: Vec<&str> = converted.split('\n').collect();
    let columns = lines[0].matches('|').count() + 1;
    let separator = "-|".repeat(columns);
    lines.insert(1, &separator);
    lines.join("\n")
}
