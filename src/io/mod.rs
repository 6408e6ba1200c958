//! Plain-text instance and solution formats.

mod reader;
mod writer;

pub use reader::{parse_instance, read_instance, MAX_VEHICLES};
pub use writer::{format_solution, parse_solution, ParsedSolution};

/// Non-blank lines with their 1-based line numbers, trimmed.
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}
