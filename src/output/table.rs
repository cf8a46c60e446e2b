//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Message shown in place of an empty table
pub const EMPTY: &str = "No results found.";

/// Format rows as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    format_table_or(data, EMPTY)
}

/// Format rows as a table, or return `empty` when there are none
pub fn format_table_or<T: Tabled>(data: &[T], empty: &str) -> String {
    if data.is_empty() {
        return empty.to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// One label/value row of a detail table
#[derive(Debug, Clone, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "FIELD")]
    pub field: String,
    #[tabled(rename = "VALUE")]
    pub value: String,
}

/// Format label/value pairs as a two-column table, skipping blank values
pub fn format_fields<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let rows: Vec<FieldRow> = fields
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(field, value)| FieldRow {
            field: field.to_string(),
            value,
        })
        .collect();
    format_table(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct TestRow {
        #[tabled(rename = "ID")]
        id: u64,
        #[tabled(rename = "TITLE")]
        title: String,
    }

    #[test]
    fn test_format_table_empty() {
        let items: Vec<TestRow> = vec![];
        assert_eq!(format_table(&items), EMPTY);
        assert_eq!(format_table_or(&items, "No projects yet."), "No projects yet.");
    }

    #[test]
    fn test_format_table_rows() {
        let items = vec![
            TestRow {
                id: 42,
                title: "Chat bot".to_string(),
            },
            TestRow {
                id: 43,
                title: "ETL pipeline".to_string(),
            },
        ];

        let result = format_table(&items);

        assert!(result.contains("ID"));
        assert!(result.contains("TITLE"));
        assert!(result.contains("Chat bot"));
        assert!(result.contains("ETL pipeline"));
        // Rounded style uses ╭ for top-left corner
        assert!(result.contains("╭"));
        assert!(result.contains("╰"));
    }

    #[test]
    fn test_format_fields_skips_blank_values() {
        let result = format_fields([
            ("Name", "Asha".to_string()),
            ("Bio", "  ".to_string()),
            ("Role", "student".to_string()),
        ]);

        assert!(result.contains("FIELD"));
        assert!(result.contains("Asha"));
        assert!(result.contains("student"));
        assert!(!result.contains("Bio"));
    }
}
