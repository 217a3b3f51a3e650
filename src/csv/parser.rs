//! Document parser: full CSV text in, headers and rows out.

use tracing::debug;

use super::record::split_record;

/// Parse result: unique, non-empty headers plus rows aligned to them.
///
/// Every row has exactly `headers.len()` cells; short records are padded
/// with empty strings and extra trailing fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Parsed {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Parse a whole document. Never fails: input with no records comes back
/// as an empty `Parsed` and the caller decides how to surface that.
pub fn parse(text: &str) -> Parsed {
    let text = text.trim();
    if text.is_empty() {
        return Parsed::default();
    }

    let mut records = text.split("\r\n").flat_map(|part| part.split('\n'));

    let headers = match records.next() {
        Some(first) => dedup_headers(split_record(first)),
        None => return Parsed::default(),
    };

    let rows: Vec<Vec<String>> = records
        .filter(|record| !record.trim().is_empty())
        .map(|record| {
            let mut cells = split_record(record);
            cells.truncate(headers.len());
            cells.resize(headers.len(), String::new());
            cells
        })
        .collect();

    debug!(headers = headers.len(), rows = rows.len(), "parsed document");

    Parsed { headers, rows }
}

/// Make header names unique and non-empty, left to right.
///
/// Empty candidates become `UnnamedColumn1`, `UnnamedColumn2`, ...; a
/// non-empty duplicate `h` becomes `h_1`, `h_2`, ... Either counter advances
/// until the generated name no longer collides with an earlier header.
fn dedup_headers(candidates: Vec<String>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let name = candidate.trim();
        let unique = if name.is_empty() {
            next_free(&headers, |n| format!("UnnamedColumn{}", n))
        } else if headers.iter().any(|h| h == name) {
            next_free(&headers, |n| format!("{}_{}", name, n))
        } else {
            name.to_string()
        };
        headers.push(unique);
    }

    headers
}

fn next_free(headers: &[String], render: impl Fn(usize) -> String) -> String {
    let mut n = 1;
    loop {
        let candidate = render(n);
        if !headers.iter().any(|h| *h == candidate) {
            return candidate;
        }
        n += 1;
    }
}
