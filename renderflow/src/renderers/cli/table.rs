use crate::types::{PayloadValue, TableData};
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::ASCII_FULL, presets::UTF8_FULL, Attribute, Cell,
    CellAlignment, ContentArrangement, Table, TableComponent,
};

/// Border presets for terminal tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    /// Rounded UTF-8 borders
    #[default]
    Rounded,
    /// Rounded borders without separators between data rows
    Compact,
    /// Plain ASCII borders and no styling, for logs and pipes
    Ascii,
}

/// Lays out a [`TableData`] column set as a terminal table
///
/// Columns whose cells are all numbers are right-aligned. Cells missing from
/// a short column render empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultTable {
    style: TableStyle,
}

impl ResultTable {
    pub fn new(style: TableStyle) -> Self {
        Self { style }
    }

    pub fn render(&self, data: &TableData) -> String {
        let mut table = self.base_table();

        table.set_header(
            data.headers()
                .map(|header| Cell::new(header).add_attribute(Attribute::Bold)),
        );

        let numeric = numeric_columns(data);
        for idx in 0..data.row_count() {
            let cells = data.row(idx).into_iter().zip(&numeric).map(|(cell, numeric)| {
                let text = cell.map(ToString::to_string).unwrap_or_default();
                let cell = Cell::new(text);
                if *numeric {
                    cell.set_alignment(CellAlignment::Right)
                } else {
                    cell
                }
            });
            table.add_row(cells);
        }

        table.to_string()
    }

    fn base_table(&self) -> Table {
        let mut table = Table::new();
        match self.style {
            TableStyle::Ascii => {
                table.load_preset(ASCII_FULL).force_no_tty();
            }
            TableStyle::Rounded | TableStyle::Compact => {
                table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
            }
        }
        if self.style == TableStyle::Compact {
            table
                .remove_style(TableComponent::HorizontalLines)
                .remove_style(TableComponent::MiddleIntersections);
        }
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

fn numeric_columns(data: &TableData) -> Vec<bool> {
    let width = data.headers().count();
    (0..width)
        .map(|col| {
            let mut cells = (0..data.row_count()).filter_map(|row| data.row(row)[col]);
            let mut any = false;
            let all_numeric = cells.all(|cell| {
                any = true;
                matches!(cell, PayloadValue::Number(_))
            });
            any && all_numeric
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableData {
        TableData::new()
            .with_column("name", ["alpha", "beta"])
            .with_column("score", [1.5, 20.0])
    }

    #[test]
    fn test_headers_and_cells() {
        let table = ResultTable::default().render(&sample());
        assert!(table.contains("name"));
        assert!(table.contains("score"));
        assert!(table.contains("alpha"));
        assert!(table.contains("20.0"));
    }

    #[test]
    fn test_numeric_columns_detected() {
        let data = sample().with_column("mixed", [PayloadValue::from(1), PayloadValue::from("x")]);
        assert_eq!(numeric_columns(&data), [false, true, false]);
    }

    #[test]
    fn test_short_column_pads_with_empty_cells() {
        let data = TableData::new()
            .with_column("a", [1, 2, 3])
            .with_column("b", ["only"]);
        let table = ResultTable::new(TableStyle::Ascii).render(&data);
        assert_eq!(table.lines().filter(|line| line.starts_with('|')).count(), 4);
    }

    #[test]
    fn test_ascii_style_has_no_box_drawing() {
        let table = ResultTable::new(TableStyle::Ascii).render(&sample());
        assert!(table.contains('+'));
        assert!(!table.contains('│'));
    }
}
