use serde::Serialize;

use crate::format::display_width;

/// Widest display width among `items`, with a minimum of `min`. Widths are
/// terminal cells, so CJK titles line up.
pub fn max_column_width<'a>(items: impl Iterator<Item = &'a str>, min: usize) -> usize {
    items.map(display_width).max().unwrap_or(min).max(min)
}

/// Print a horizontal separator of box-drawing chars.
pub fn separator(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Serialize to pretty JSON and print to stdout.
pub fn print_json_stdout(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "report_helpers_test.rs"]
mod tests;
