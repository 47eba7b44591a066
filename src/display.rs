use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::color::{self, GREEN, RED, RESET};
use crate::config::{Config, Layout};
use crate::data::{Report, ReportLine};
use crate::logo::Logo;

pub use crate::data::report::CONNECTOR;

/// Gap between the logo column and the report column
const GUTTER: &str = "  ";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub color: bool,
    pub label_color: String,
    pub connector_color: String,
    /// Display width the logo column is padded to
    pub column_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            color: false,
            label_color: RED.to_string(),
            connector_color: GREEN.to_string(),
            column_width: 40,
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &Config, color: bool) -> Self {
        let defaults = RenderOptions::default();
        RenderOptions {
            color,
            label_color: color::resolve(&config.colors.label).unwrap_or(defaults.label_color),
            connector_color: color::resolve(&config.colors.connector).unwrap_or(defaults.connector_color),
            column_width: config.display.column_width,
        }
    }
}

/// `label: value`, with the connector for continuation lines and the
/// label (and connector) colored when enabled.
pub fn format_report_line(line: &ReportLine, opts: &RenderOptions) -> String {
    let mut out = String::new();
    if opts.color {
        if line.continuation {
            out.push_str(&opts.connector_color);
            out.push_str(CONNECTOR);
            out.push_str(RESET);
        }
        out.push_str(&opts.label_color);
        out.push_str(&line.label);
        out.push_str(RESET);
    } else {
        if line.continuation {
            out.push_str(CONNECTOR);
        }
        out.push_str(&line.label);
    }
    out.push_str(": ");
    out.push_str(&line.value);
    out
}

pub fn render<W: Write>(
    out: &mut W,
    layout: Layout,
    logo: Option<&Logo>,
    report: &Report,
    opts: &RenderOptions,
) -> io::Result<()> {
    match layout {
        Layout::Sequential => render_sequential(out, logo, report, opts),
        Layout::Columns => render_columns(out, logo, report, opts),
    }
}

/// The whole logo, then the report underneath it.
pub fn render_sequential<W: Write>(
    out: &mut W,
    logo: Option<&Logo>,
    report: &Report,
    opts: &RenderOptions,
) -> io::Result<()> {
    if let Some(logo) = logo {
        for line in logo.render(opts.color) {
            writeln!(out, "{}", line)?;
        }
    }
    for line in report.lines() {
        writeln!(out, "{}", format_report_line(line, opts))?;
    }
    out.flush()
}

/// Logo and report side by side.
///
/// The logo column is padded to `column_width` display cells (longer
/// lines are not cut) and rows continue until both sides run out.
pub fn render_columns<W: Write>(
    out: &mut W,
    logo: Option<&Logo>,
    report: &Report,
    opts: &RenderOptions,
) -> io::Result<()> {
    let (shown, visible) = match logo {
        Some(logo) => (logo.render(opts.color), logo.render(false)),
        None => (Vec::new(), Vec::new()),
    };
    let rows = shown.len().max(report.len());

    for row in 0..rows {
        let (left, width) = match (shown.get(row), visible.get(row)) {
            (Some(left), Some(plain)) => (left.as_str(), UnicodeWidthStr::width(plain.as_str())),
            _ => ("", 0),
        };
        let padding = opts.column_width.saturating_sub(width);
        write!(out, "{}{}", left, " ".repeat(padding))?;

        if let Some(line) = report.lines().get(row) {
            write!(out, "{}{}", GUTTER, format_report_line(line, opts))?;
        }
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::report::MAX_LINE_WIDTH;
    use crate::logo::Palette;

    const PALETTE: Palette = ["<1>", "<2>", "", "", ""];

    fn logo(lines: &[&str]) -> Logo {
        Logo {
            name: "Test".to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            palette: PALETTE,
        }
    }

    fn report(n: usize) -> Report {
        let mut report = Report::new();
        for i in 0..n {
            report.append(format!("L{}", i + 1), format_args!("v{}", i + 1));
        }
        report
    }

    fn rendered<F>(f: F) -> Vec<String>
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap().lines().map(String::from).collect()
    }

    #[test]
    fn columns_run_to_the_longer_side() {
        let logo = logo(&["aaa", "bb", "c"]);
        let report = report(5);
        let opts = RenderOptions::default();

        let rows = rendered(|out| render_columns(out, Some(&logo), &report, &opts));
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], format!("{:<40}  L1: v1", "aaa"));
        assert_eq!(rows[2], format!("{:<40}  L3: v3", "c"));
        assert_eq!(rows[3], format!("{}  L4: v4", " ".repeat(40)));
        assert_eq!(rows[4], format!("{}  L5: v5", " ".repeat(40)));
    }

    #[test]
    fn columns_pad_logo_rows_without_report() {
        let logo = logo(&["x", "y", "z"]);
        let report = report(1);
        let opts = RenderOptions::default();

        let rows = rendered(|out| render_columns(out, Some(&logo), &report, &opts));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], format!("{:<40}", "z"));
    }

    #[test]
    fn columns_pad_by_visible_width() {
        let logo = logo(&["${c1}ab${c2}cd"]);
        let report = report(1);
        let opts = RenderOptions {
            color: true,
            ..RenderOptions::default()
        };

        let rows = rendered(|out| render_columns(out, Some(&logo), &report, &opts));
        let expected_left = format!("<1>ab<2>cd{}{}", RESET, " ".repeat(36));
        assert!(rows[0].starts_with(&expected_left));
    }

    #[test]
    fn long_logo_lines_are_not_cut() {
        let wide = "#".repeat(50);
        let logo = logo(&[wide.as_str()]);
        let rows = rendered(|out| render_columns(out, Some(&logo), &report(1), &RenderOptions::default()));
        assert_eq!(rows[0], format!("{}  L1: v1", wide));
    }

    #[test]
    fn sequential_prints_logo_then_report() {
        let logo = logo(&["${c1}top", "bottom"]);
        let mut report = report(1);
        report.append_continuation("Core [1]", format_args!("40.0 °C"));

        let rows = rendered(|out| render_sequential(out, Some(&logo), &report, &RenderOptions::default()));
        assert_eq!(rows, ["top", "bottom", "L1: v1", " -> Core [1]: 40.0 °C"]);
    }

    #[test]
    fn sequential_colors_labels_and_connectors() {
        let mut report = Report::new();
        report.append("Host", format_args!("bsd1"));
        report.append_continuation("Core [1]", format_args!("40.0 °C"));
        let opts = RenderOptions {
            color: true,
            ..RenderOptions::default()
        };

        let rows = rendered(|out| render_sequential(out, None, &report, &opts));
        assert_eq!(rows[0], format!("{RED}Host{RESET}: bsd1"));
        assert_eq!(rows[1], format!("{GREEN} -> {RESET}{RED}Core [1]{RESET}: 40.0 °C"));
    }

    #[test]
    fn longest_continuation_fits_the_line_cap() {
        let mut report = Report::new();
        report.append_continuation("Core [1]", format_args!("{}", "9".repeat(300)));

        let rows = rendered(|out| render_sequential(out, None, &report, &RenderOptions::default()));
        assert!(rows[0].starts_with(CONNECTOR));
        assert_eq!(rows[0].chars().count(), MAX_LINE_WIDTH);
    }

    #[test]
    fn no_logo_means_report_only() {
        let rows = rendered(|out| render(out, Layout::Columns, None, &report(2), &RenderOptions::default()));
        assert_eq!(rows[0], format!("{}  L1: v1", " ".repeat(40)));
        assert_eq!(rows.len(), 2);
    }
}
