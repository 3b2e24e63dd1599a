//! Tabular and key/value result rendering
//!
//! Reports, assignment views and analytics are returned as JSON by default.
//! The same values can be rendered as fixed-width text (`?format=text`) for
//! terminals and the admin UI's console pane.

use serde::Serialize;
use serde_json::Value;

/// Width of the `=` rule framing a rendered report title
const RULE_WIDTH: usize = 100;

/// Minimum width of a rendered table column
const MIN_COLUMN_WIDTH: usize = 15;

/// Width of the dotted key column in key/value output
const KEY_WIDTH: usize = 40;

/// A titled table of result rows
#[derive(Debug, Clone, Serialize)]
pub struct ReportTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    /// Summary lines printed under the table (totals and counts)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ReportTable {
    pub fn new(title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<Vec<Value>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Fixed-width rendering: framed title, padded header, one line per row
    pub fn to_text(&self) -> String {
        let mut out = framed_title(&self.title);

        if self.rows.is_empty() {
            out.push_str("No data found.\n");
            return out;
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|c| c.chars().count())
                    .chain([col.chars().count(), MIN_COLUMN_WIDTH])
                    .max()
                    .unwrap_or(MIN_COLUMN_WIDTH)
            })
            .collect();

        let header = join_padded(self.columns.iter().map(String::as_str), &widths);
        out.push_str(&header);
        out.push('\n');
        out.push_str(&"-".repeat(header.chars().count()));
        out.push('\n');

        for row in &cells {
            out.push_str(&join_padded(row.iter().map(String::as_str), &widths));
            out.push('\n');
        }

        out.push_str(&format!("\n{} rows returned.\n", self.rows.len()));
        for note in &self.notes {
            out.push_str(note);
            out.push('\n');
        }
        out
    }
}

/// A titled list of labelled values, optionally split into sections
#[derive(Debug, Clone, Default)]
pub struct KeyValueReport {
    pub title: String,
    pub sections: Vec<Vec<(String, String)>>,
}

impl KeyValueReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, entries: Vec<(String, String)>) -> Self {
        self.sections.push(entries);
        self
    }

    /// Each entry renders as `key........ value`
    pub fn to_text(&self) -> String {
        let mut out = framed_title(&self.title);

        if self.sections.iter().all(|s| s.is_empty()) {
            out.push_str("No data found.\n");
            return out;
        }

        for section in &self.sections {
            for (key, value) in section {
                out.push_str(&format!("{:.<width$} {}\n", key, value, width = KEY_WIDTH));
            }
            out.push('\n');
        }
        out
    }
}

fn framed_title(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{}\n{}\n{}\n\n", rule, title.to_uppercase(), rule)
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Text for one table cell; fractional numbers get two decimals
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => format!("{:.2}", n.as_f64().unwrap_or_default()),
        other => other.to_string(),
    }
}

/// Indian-rupee amount with thousands separators, e.g. `₹1,234.56`
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}₹{}.{}", sign, grouped, cents)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}
