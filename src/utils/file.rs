//! File reading utilities

use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read at most `max_lines` lines, each cut to `max_width` characters,
/// with line terminators stripped.
pub fn read_lines_capped<P: AsRef<Path>>(path: P, max_lines: usize, max_width: usize) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();

    for line in reader.lines().take(max_lines) {
        let mut line = line?;
        if line.ends_with('\r') {
            line.pop();
        }
        if let Some((idx, _)) = line.char_indices().nth(max_width) {
            line.truncate(idx);
        }
        lines.push(line);
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn caps_line_count_and_width() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for i in 0..40 {
            writeln!(file, "{}{}", i, "#".repeat(300)).unwrap();
        }

        let lines = read_lines_capped(file.path(), 30, 255).unwrap();
        assert_eq!(lines.len(), 30);
        assert!(lines.iter().all(|l| l.chars().count() == 255));
        assert!(lines[29].starts_with("29#"));
    }

    #[test]
    fn strips_terminators_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  top  \r\nlast").unwrap();

        let lines = read_lines_capped(file.path(), 30, 255).unwrap();
        assert_eq!(lines, ["  top  ", "last"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_lines_capped("/nonexistent/logo.txt", 30, 255).is_err());
    }
}
