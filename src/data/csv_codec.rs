use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::error::Result;
use super::model::{field_text, Record};

/// Encode records as CSV text.
///
/// The header is the first record's field names joined by commas. Every
/// data cell is quoted, with embedded `"` written as `\"` rather than the
/// RFC 4180 `""`. Consumers of the exported files depend on that dialect,
/// so it stays. Rows end in `\n` with no trailing newline after the last
/// one, and a field a record lacks is written as `undefined`.
///
/// An empty slice encodes to the empty string.
pub fn to_csv(records: &[Record]) -> Result<String> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.field_names().collect();

    let mut lines = vec![headers.join(",")];
    if headers.is_empty() {
        // No cells to quote; each record is an empty line.
        lines.extend(records.iter().map(|_| String::new()));
        return Ok(lines.join("\n"));
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .double_quote(false)
        .escape(b'\\')
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        writer.write_record(headers.iter().map(|h| field_text(record.get(h))))?;
    }

    let body = writer.into_inner().map_err(|e| e.into_error())?;
    let body = String::from_utf8_lossy(&body);
    lines.push(body.trim_end_matches('\n').to_string());

    Ok(lines.join("\n"))
}
