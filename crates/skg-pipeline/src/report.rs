//! Result reporting
//!
//! Two output shapes for the pages a run collected: an ASCII table for
//! the console (Title wrapped at 30 columns, Text at 50) and a plain-text
//! dump file with a fixed `=` separator between records.

use std::path::Path;

use skg_core::{PageRecord, Result};

const TITLE_WRAP: usize = 30;
const TEXT_WRAP: usize = 50;
const SEPARATOR_LEN: usize = 50;

// ============================================================================
// Console Table
// ============================================================================

/// Render the collected pages as a bordered two-column table
pub fn render_table(pages: &[PageRecord]) -> String {
    let rows: Vec<(Vec<String>, Vec<String>)> = pages
        .iter()
        .map(|page| {
            (
                wrap_cell(&page.title, TITLE_WRAP),
                wrap_cell(&page.text, TEXT_WRAP),
            )
        })
        .collect();

    let title_width = column_width("Title", rows.iter().flat_map(|(title, _)| title));
    let text_width = column_width("Text", rows.iter().flat_map(|(_, text)| text));

    let border = format!(
        "+{}+{}+",
        "-".repeat(title_width + 2),
        "-".repeat(text_width + 2)
    );

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    out.push_str(&format_row("Title", "Text", title_width, text_width));
    out.push('\n');
    out.push_str(&border);
    out.push('\n');

    for (title_lines, text_lines) in &rows {
        let height = title_lines.len().max(text_lines.len());
        for i in 0..height {
            let title = title_lines.get(i).map(String::as_str).unwrap_or("");
            let text = text_lines.get(i).map(String::as_str).unwrap_or("");
            out.push_str(&format_row(title, text, title_width, text_width));
            out.push('\n');
        }
    }

    out.push_str(&border);
    out
}

/// Wrap a cell value, preserving embedded newlines as row breaks
fn wrap_cell(value: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for paragraph in value.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        for line in textwrap::wrap(paragraph, width) {
            lines.push(line.into_owned());
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn column_width<'a>(header: &str, lines: impl Iterator<Item = &'a String>) -> usize {
    lines
        .map(|line| line.chars().count())
        .chain([header.chars().count()])
        .max()
        .unwrap_or(0)
}

fn format_row(left: &str, right: &str, left_width: usize, right_width: usize) -> String {
    format!("| {left:<left_width$} | {right:<right_width$} |")
}

// ============================================================================
// Text Dump
// ============================================================================

/// Write each page as `title\n\ntext\n\n` followed by a 50-`=` separator
///
/// Truncates any existing file at `path`.
pub fn write_dump(pages: &[PageRecord], path: &Path) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    for page in pages {
        write!(
            file,
            "{}\n\n{}\n\n{}\n\n",
            page.title,
            page.text,
            "=".repeat(SEPARATOR_LEN)
        )?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_headers_and_borders() {
        let pages = vec![PageRecord::new("u", "Altera News", "Altera builds chips.")];
        let table = render_table(&pages);

        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("+-"));
        assert!(lines[1].contains("Title"));
        assert!(lines[1].contains("Text"));
        assert!(table.contains("Altera News"));
        assert!(lines.last().unwrap().starts_with("+-"));
    }

    #[test]
    fn test_long_cells_wrap_at_column_limits() {
        let title = "An extremely long page title that cannot fit one line";
        let text = "word ".repeat(40);
        let pages = vec![PageRecord::new("u", title, text.trim())];

        let table = render_table(&pages);
        for line in table.lines().filter(|l| l.starts_with('|')) {
            let cells: Vec<&str> = line.trim_matches('|').split('|').collect();
            assert!(cells[0].trim().chars().count() <= TITLE_WRAP);
            assert!(cells[1].trim().chars().count() <= TEXT_WRAP);
        }
    }

    #[test]
    fn test_empty_run_renders_header_only() {
        let table = render_table(&[]);
        let lines: Vec<&str> = table.lines().collect();

        // Border, header, border, border
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("Title"));
    }

    #[test]
    fn test_dump_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");

        let pages = vec![
            PageRecord::new("u1", "First Title", "First body text."),
            PageRecord::new("u2", "Second Title", "Second body\nwith two lines."),
        ];
        write_dump(&pages, &path).unwrap();

        let dump = std::fs::read_to_string(&path).unwrap();
        let separator = "=".repeat(50);
        let records: Vec<&str> = dump
            .split(&format!("{separator}\n\n"))
            .filter(|r| !r.is_empty())
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], "First Title\n\nFirst body text.\n\n");
        assert_eq!(records[1], "Second Title\n\nSecond body\nwith two lines.\n\n");
    }

    #[test]
    fn test_dump_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        std::fs::write(&path, "stale content").unwrap();

        write_dump(&[PageRecord::new("u", "T", "B")], &path).unwrap();

        let dump = std::fs::read_to_string(&path).unwrap();
        assert!(!dump.contains("stale"));
        assert!(dump.starts_with("T\n\nB\n\n"));
    }
}
