//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Style, object::Rows},
};

/// Render rows as a rounded-border table with a centered header row.
pub fn format_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.modify(Rows::first(), Alignment::center());
    table.to_string()
}
