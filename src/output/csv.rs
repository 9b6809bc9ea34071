//! CSV serialization of harvest results
//!
//! Fields are quoted only when they contain the delimiter, a double quote, or
//! a line break; embedded double quotes are doubled. Rows end with the
//! platform newline.

use crate::model::{AuthorBio, Quote};
use crate::output::OutputResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::mem::take;
use std::path::Path;
use std::sync::Arc;

const SEPARATOR: char = ',';

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

fn needs_quotes(field: &str) -> bool {
    field.contains(SEPARATOR) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Writes a single CSV row to any writer
pub fn write_row<W: Write>(w: &mut W, row: &[&str]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", SEPARATOR)?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(LINE_ENDING.as_bytes())
}

/// Renders a tag list as a bracketed list literal, e.g. `['life', 'love']`
///
/// Each tag is wrapped in single quotes, or in double quotes when it contains
/// a single quote but no double quote. Afterwards every double quote in the
/// result is replaced by a single quote, so `it's` comes out as `'it's'`.
/// The substitution is lossy and the output cannot be parsed back reliably.
///
/// Non-printable characters are escaped as `\xNN`, `\uNNNN` or
/// `\UNNNNNNNN`: control characters, whitespace other than the plain space,
/// invisible format characters and private-use code points.
pub fn format_tags(tags: &[String]) -> String {
    let items: Vec<String> = tags.iter().map(|tag| quote_literal(tag)).collect();
    format!("[{}]", items.join(", ")).replace('"', "'")
}

fn quote_literal(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if !is_printable(c) => out.push_str(&escape_code_point(c)),
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control() || c.is_whitespace() || is_format_char(c) || is_private_use(c))
}

/// Invisible formatting code points (zero-width, bidi controls, BOM, ...)
fn is_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{110BD}'
            | '\u{1D173}'..='\u{1D17A}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
    )
}

fn is_private_use(c: char) -> bool {
    matches!(
        c,
        '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}'
    )
}

fn escape_code_point(c: char) -> String {
    let code = c as u32;
    if code <= 0xFF {
        format!("\\x{:02x}", code)
    } else if code <= 0xFFFF {
        format!("\\u{:04x}", code)
    } else {
        format!("\\U{:08x}", code)
    }
}

/// Writes the `text,author,tags` header and one row per quote
pub fn write_quotes<W: Write>(w: &mut W, quotes: &[Quote]) -> io::Result<()> {
    write_row(w, &["text", "author", "tags"])?;
    for quote in quotes {
        let tags = format_tags(&quote.tags);
        write_row(w, &[quote.text.as_str(), quote.author.as_str(), tags.as_str()])?;
    }
    w.flush()
}

/// Writes the `author,bio` header and one row per biography
pub fn write_authors<W: Write>(w: &mut W, authors: &[Arc<AuthorBio>]) -> io::Result<()> {
    write_row(w, &["author", "bio"])?;
    for author in authors {
        write_row(w, &[author.author.as_str(), author.bio.as_str()])?;
    }
    w.flush()
}

/// Writes quotes to a CSV file, replacing any existing file
///
/// # Arguments
///
/// * `quotes` - The quotes, in the order they should appear
/// * `output_path` - Destination file
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the file
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_quotes_csv(quotes: &[Quote], output_path: &Path) -> OutputResult<()> {
    let mut file = BufWriter::new(File::create(output_path)?);
    write_quotes(&mut file, quotes)?;
    Ok(())
}

/// Writes author biographies to a CSV file, replacing any existing file
pub fn write_authors_csv(authors: &[Arc<AuthorBio>], output_path: &Path) -> OutputResult<()> {
    let mut file = BufWriter::new(File::create(output_path)?);
    write_authors(&mut file, authors)?;
    Ok(())
}

/// Parses CSV text written by this module back into rows
///
/// Handles quoted fields with doubled quotes and both `\n` and `\r\n`
/// line endings. Blank lines are skipped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            c if c == SEPARATOR && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            c => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
