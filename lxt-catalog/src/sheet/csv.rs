//! Quote-aware splitter for the spreadsheet CSV export
//!
//! The gviz export wraps most cells in double quotes and the model/notes
//! columns routinely contain literal commas, so a plain `split(',')` is not
//! an option. The grammar is small enough that a hand-rolled scanner beats
//! pulling in a full CSV reader: comma delimiter, `"` toggles quoted mode,
//! `""` inside a quoted cell decodes to one literal quote.

/// Split a single line of delimited text into trimmed cells.
///
/// Never fails: an unterminated quote simply runs to end of line and the
/// open cell is flushed. There is no escape for `"` outside quoted context.
pub fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Doubled quote inside a quoted cell
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    // Flush the last open cell
    cells.push(current.trim().to_string());
    cells
}
