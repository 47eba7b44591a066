//! The ordered, bounded list of report lines probes append to

use std::fmt;

/// Most lines a report will hold; later appends are dropped.
pub const MAX_LINES: usize = 30;

/// Widest rendered line, in characters, connector included.
pub const MAX_LINE_WIDTH: usize = 255;

/// Printed before lines that continue the previous fact
pub const CONNECTOR: &str = " -> ";

/// One fact, displayed as `label: value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
    /// Belongs to the fact on the previous line (per-core temperatures)
    pub continuation: bool,
}

impl ReportLine {
    /// Uncolored `label: value` text
    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Report accumulator.
///
/// Insertion order is display order. Appends past [`MAX_LINES`] are
/// silently ignored and values are cut so that no rendered line, with
/// its connector, exceeds [`MAX_LINE_WIDTH`] characters.
#[derive(Debug, Clone, Default)]
pub struct Report {
    lines: Vec<ReportLine>,
}

impl Report {
    pub fn new() -> Self {
        Report {
            lines: Vec::with_capacity(MAX_LINES),
        }
    }

    /// Append `label: <formatted value>`.
    ///
    /// ```
    /// use bsdfetch::data::Report;
    ///
    /// let mut report = Report::new();
    /// report.append("RAM", format_args!("{} MB", 4096));
    /// assert_eq!(report.lines()[0].text(), "RAM: 4096 MB");
    /// ```
    pub fn append(&mut self, label: impl Into<String>, value: fmt::Arguments<'_>) {
        self.push(label.into(), value, false);
    }

    /// Append a line that continues the previous fact.
    pub fn append_continuation(&mut self, label: impl Into<String>, value: fmt::Arguments<'_>) {
        self.push(label.into(), value, true);
    }

    fn push(&mut self, label: String, value: fmt::Arguments<'_>, continuation: bool) {
        if self.is_full() {
            return;
        }

        let width = if continuation {
            MAX_LINE_WIDTH - CONNECTOR.len()
        } else {
            MAX_LINE_WIDTH
        };
        let label = truncate_chars(label, width.saturating_sub(2));
        let budget = width.saturating_sub(label.chars().count() + 2);
        let value = truncate_chars(value.to_string(), budget);

        self.lines.push(ReportLine {
            label,
            value,
            continuation,
        });
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lines.len() >= MAX_LINES
    }

    /// Value of the first line carrying `label`
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}
