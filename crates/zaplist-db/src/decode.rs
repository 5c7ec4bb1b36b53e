use zaplist_core::ChatRow;

use crate::error::{DbError, Result};

/// Decode `sqlite3 -json` output: a single JSON array of row objects.
/// Zero rows prints nothing at all, which is not an error.
pub fn decode_json(stdout: &[u8]) -> Result<Vec<ChatRow>> {
    let text = std::str::from_utf8(stdout).map_err(|e| DbError::Decode(e.to_string()))?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(|e| DbError::Decode(e.to_string()))
}

/// Decode `sqlite3 -csv -header` output: first line column names, then one
/// comma-separated line per row.
///
/// The split is naive and positional. sqlite3 quotes fields that contain
/// the separator and this decoder does not reassemble them, so such rows
/// misalign and their trailing fields come out empty. A wrapping quote
/// pair on a simple value is stripped. Malformed rows never fail the
/// batch; a missing or empty column is an absent field.
pub fn decode_table(stdout: &str) -> Vec<ChatRow> {
    let mut lines = stdout.lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns: Vec<&str> = header.trim_end_matches('\r').split(',').collect();

    let mut rows = Vec::new();
    for line in lines {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let values: Vec<&str> = line.split(',').collect();

        let Some(jid) = column_value(&columns, &values, "jid") else {
            continue;
        };
        rows.push(ChatRow {
            jid,
            name: column_value(&columns, &values, "name"),
            last_date: column_value(&columns, &values, "lastDate").and_then(|v| v.parse().ok()),
            preview: column_value(&columns, &values, "preview"),
        });
    }
    rows
}

fn column_value(columns: &[&str], values: &[&str], name: &str) -> Option<String> {
    let idx = columns.iter().position(|c| *c == name)?;
    let raw = *values.get(idx)?;
    let raw = raw
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .unwrap_or(raw);
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
