//! Fixed-width rendering of listings and structure reports.
//!
//! Widths are counted in characters. Header labels are padded but never
//! cut; row values are padded or truncated to their column width.

use crate::query::{ListOutput, ListedRow, Listing, Structure};
use std::fmt;

const RECORD_LABEL: &str = "Record# ";

/// Left-justifies `value` in `width` characters, cutting it if longer.
pub fn fit(value: &str, width: usize) -> String {
    let cut: String = value.chars().take(width).collect();
    format!("{:<width$}", cut, width = width)
}

/// Left-justifies `label` in at least `width` characters.
pub fn pad(label: &str, width: usize) -> String {
    format!("{:<width$}", label, width = width)
}

impl Listing {
    /// Column labels joined by one space
    pub fn header(&self) -> String {
        let labels: Vec<String> = self.columns.iter().map(|c| pad(&c.label, c.width)).collect();
        let header = labels.join(" ");
        if self.show_record_numbers {
            format!("{}{}", RECORD_LABEL, header)
        } else {
            header
        }
    }

    /// Dashes as long as the header
    pub fn rule(&self) -> String {
        "-".repeat(self.header().chars().count())
    }

    /// Renders one row
    pub fn render_row(&self, row: &ListedRow) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .zip(row.values.iter())
            .map(|(column, value)| fit(value, column.width))
            .collect();
        let line = cells.join(" ");
        if self.show_record_numbers {
            format!("{:7} {}", row.number, line)
        } else {
            line
        }
    }

    /// Header, rule and every row
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.header());
        lines.push(self.rule());
        lines.extend(self.rows.iter().map(|row| self.render_row(row)));
        lines
    }
}

impl Structure {
    /// Title, column heads and one line per field
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Structure for database: {}", self.table),
            "Field Name   Type  Width  Dec".to_string(),
            "----------   ----  -----  ---".to_string(),
        ];
        lines.extend(self.fields.iter().map(|field| {
            format!(
                "{:<12} {:<5} {:>5}  {:>3}",
                field.name, field.field_type, field.width, field.decimals
            )
        }));
        lines
    }
}

impl ListOutput {
    /// Rendered output lines
    pub fn lines(&self) -> Vec<String> {
        match self {
            ListOutput::Records(listing) => listing.lines(),
            ListOutput::Structure(structure) => structure.lines(),
        }
    }
}

fn write_lines(f: &mut fmt::Formatter<'_>, lines: &[String]) -> fmt::Result {
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{}", line)?;
    }
    Ok(())
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lines(f, &self.lines())
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lines(f, &self.lines())
    }
}

impl fmt::Display for ListOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lines(f, &self.lines())
    }
}
