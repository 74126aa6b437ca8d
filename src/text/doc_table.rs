//! Markdown option tables in the config README.
//!
//! ```markdown
//! ## USB Support
//!
//! Options for the Type-C controllers.
//!
//! | Option | Type | Description |
//! |--------|------|-------------|
//! | `USB_UAS` | module | USB Attached SCSI |
//! ```
//!
//! Rows are keyed by the backticked option name. Finding where a new row
//! goes is a small state machine over the lines following the heading; a
//! heading without a well-formed table is a no-op, not an error.

use crate::domain::models::{DocRow, OptionName};
use crate::text::lines::{ending_for_insert, join_lines, split_lines, RawLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableScan {
    /// Looking for `## <heading>`.
    BeforeTable,
    /// Heading seen; prose and the column header row may precede the separator.
    InHeader,
    /// Separator seen; consuming `|` rows.
    InRows,
    AfterTable,
}

fn is_separator(body: &str) -> bool {
    match body.strip_prefix('|') {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.starts_with('-') || rest.starts_with(":-")
        }
        None => false,
    }
}

/// `#` or `##` heading. Deeper subheadings belong to the current section.
fn is_section_heading(body: &str) -> bool {
    let body = body.trim_start();
    let level = body.chars().take_while(|&c| c == '#').count();
    (1..=2).contains(&level) && body[level..].chars().next().map_or(true, char::is_whitespace)
}

fn is_row_for(body: &str, name: &OptionName) -> bool {
    body.starts_with('|')
        && body
            .to_ascii_lowercase()
            .contains(&format!("`{}`", name.bare().to_ascii_lowercase()))
}

/// Index at which a new row is inserted under `heading`: right after the
/// table's last row, or after the separator when the table has no rows yet.
fn table_insert_index(lines: &[RawLine], heading: &str) -> Option<usize> {
    let heading_line = format!("## {}", heading.trim());
    let mut state = TableScan::BeforeTable;
    let mut last = None;

    for (i, line) in lines.iter().enumerate() {
        let body = line.body.as_str();
        state = match state {
            TableScan::BeforeTable if body.trim() == heading_line => TableScan::InHeader,
            TableScan::BeforeTable => TableScan::BeforeTable,
            TableScan::InHeader if is_separator(body) => {
                last = Some(i);
                TableScan::InRows
            }
            // Ran into the next section before finding a table.
            TableScan::InHeader if is_section_heading(body) => return None,
            TableScan::InHeader => TableScan::InHeader,
            TableScan::InRows if body.starts_with('|') => {
                last = Some(i);
                TableScan::InRows
            }
            TableScan::InRows | TableScan::AfterTable => TableScan::AfterTable,
        };
        if state == TableScan::AfterTable {
            break;
        }
    }

    match state {
        TableScan::InRows | TableScan::AfterTable => last.map(|i| i + 1),
        TableScan::BeforeTable | TableScan::InHeader => None,
    }
}

#[derive(Debug, Clone)]
pub struct DocText {
    lines: Vec<RawLine>,
}

impl DocText {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    pub fn render(&self) -> String {
        join_lines(&self.lines)
    }

    pub fn find_row(&self, name: &OptionName) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| is_row_for(&l.body, name))
            .map(|l| l.body.trim())
    }

    /// Rewrites an existing row for the option anywhere in the document, or
    /// appends one to the table under `row.heading`.
    pub fn add_row(&mut self, row: &DocRow) -> bool {
        let new_row = row.render();

        if let Some(idx) = self.lines.iter().position(|l| is_row_for(&l.body, &row.option)) {
            if self.lines[idx].body.trim() == new_row {
                return false;
            }
            self.lines[idx].body = new_row;
            return true;
        }

        let Some(idx) = table_insert_index(&self.lines, &row.heading) else {
            tracing::debug!(heading = %row.heading, "no table under heading");
            return false;
        };
        let ending = ending_for_insert(&mut self.lines, idx);
        self.lines.insert(
            idx,
            RawLine {
                body: new_row,
                ending,
            },
        );
        true
    }

    /// Drops every row for the option across all tables.
    pub fn remove_rows(&mut self, name: &OptionName) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| !is_row_for(&l.body, name));
        self.lines.len() != before
    }
}
