//! Common helper functions for output formatting.

use owo_colors::OwoColorize;

/// Width of the label column in card tables.
pub const LABEL_WIDTH: usize = 16;

/// Width of the id column in card tables.
pub const ID_WIDTH: usize = 20;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Appends a dimmed header line.
pub fn push_header(output: &mut String, header: &str, use_colors: bool) {
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(header);
        output.push('\n');
    }
}

/// Appends a bold title line.
pub fn push_title(output: &mut String, title: &str, use_colors: bool) {
    if use_colors {
        output.push_str(&format!("{}\n", title.green().bold()));
    } else {
        output.push_str(title);
        output.push('\n');
    }
}

/// Pads and colors a card label.
pub fn format_label(label: &str, use_colors: bool) -> String {
    let padded = format!("{:<LABEL_WIDTH$}", truncate_str(label, LABEL_WIDTH));
    if use_colors && !label.is_empty() {
        padded.cyan().to_string()
    } else {
        padded
    }
}

/// The column header used by card tables.
pub fn card_table_header() -> String {
    format!("{:<LABEL_WIDTH$} {:<ID_WIDTH$} {}", "Label", "ID", "Title")
}

/// One card table row.
pub fn format_card_row(label: &str, id: &str, title: &str, use_colors: bool) -> String {
    format!(
        "{} {:<ID_WIDTH$} {}",
        format_label(label, use_colors),
        truncate_str(id, ID_WIDTH),
        truncate_str(title, 50)
    )
}
