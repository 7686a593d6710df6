//! Quote-aware CSV reader.
//!
//! Handles commas and line breaks inside double quotes, `""` escapes, CRLF
//! line ends and blank lines.

/// One data row, aligned with the table's headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    values: Vec<String>,
}

/// A parsed CSV document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    /// Trimmed header names.
    pub headers: Vec<String>,
    /// Data rows.
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    /// Parses a document; the first non-blank record is the header.
    ///
    /// A leading UTF-8 byte order mark is ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = parse_records(text).into_iter();
        let headers = records
            .next()
            .map(|h| h.into_iter().map(|name| name.trim().to_string()).collect())
            .unwrap_or_default();

        Self {
            headers,
            rows: records.map(|values| CsvRow { values }).collect(),
        }
    }

    /// Required columns absent from the header, in the order given.
    #[must_use]
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|column| !self.headers.iter().any(|h| h == *column))
            .map(|column| (*column).to_string())
            .collect()
    }

    /// Trimmed value of a column in a row; empty when the column or cell is absent.
    #[must_use]
    pub fn value<'a>(&self, row: &'a CsvRow, column: &str) -> &'a str {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|index| row.values.get(index))
            .map_or("", |value| value.trim())
    }
}

/// Splits text into records of fields.
fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }
    records
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.iter().all(|f| f.trim().is_empty());
    if !blank {
        records.push(record);
    }
}
