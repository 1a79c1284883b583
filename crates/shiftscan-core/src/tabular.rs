//! Row/column text encoding for validated records.
//!
//! The header is taken from the first record's column names, in that
//! record's order. Later records are rendered against that header; a column
//! a later record lacks renders as an empty cell and extra columns are
//! dropped.

/// One cell value. Text is quoted only when it needs to be; numbers render
/// in plain decimal form.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    #[must_use]
    pub fn text(s: &str) -> Self {
        Cell::Text(s.to_owned())
    }

    fn render(&self) -> String {
        match self {
            Cell::Text(s) if s.contains(',') || s.contains('"') => {
                format!("\"{}\"", s.replace('"', "\"\""))
            }
            Cell::Text(s) => s.clone(),
            // Negative zero prints as `-0` otherwise.
            Cell::Number(n) if *n == 0.0 => "0".to_owned(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

/// A record that can be laid out as named columns.
pub trait TabularRecord {
    fn columns(&self) -> Vec<(&'static str, Cell)>;
}

/// Encode `records` as comma-separated rows joined by `\n`.
///
/// Returns an empty string when `records` is empty. There is no trailing
/// newline.
#[must_use]
pub fn encode_csv<T: TabularRecord>(records: &[T]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let header: Vec<&'static str> = first.columns().into_iter().map(|(name, _)| name).collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header.join(","));

    for record in records {
        let columns = record.columns();
        let row: Vec<String> = header
            .iter()
            .map(|name| {
                columns
                    .iter()
                    .find(|(col, _)| col == name)
                    .map(|(_, cell)| cell.render())
                    .unwrap_or_default()
            })
            .collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

#[cfg(test)]
#[path = "tabular_test.rs"]
mod tests;
