//! Table rendering for the session.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use visit_ingest::FileListing;
use visit_model::{Visit, VisitColumn};

/// Numbered list of files, 1-based as the selection prompt expects.
pub fn file_table(listing: &FileListing) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("File")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, name) in listing.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(name.to_string_lossy()),
        ]);
    }
    table
}

/// Visits with the file's column labels as header.
pub fn visit_table(visits: &[Visit]) -> Table {
    let mut table = Table::new();
    let header = VisitColumn::ALL.map(|column| header_cell(column.header()));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for visit in visits {
        let row = visit.fields().map(|(_, value)| Cell::new(value));
        table.add_row(row);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_table_has_one_row_per_visit() {
        let visits = vec![
            Visit::new("1", "Иванов", "Петров", "Осмотр", 30),
            Visit::new("2", "Сидорова", "Кузнецова", "Консультация", 15),
        ];
        let mut table = visit_table(&visits);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 5);

        let rendered = table.to_string();
        assert!(rendered.contains("Сидорова"));
        assert!(rendered.contains("Длительность"));
    }

    #[test]
    fn empty_visit_table_keeps_header() {
        let table = visit_table(&[]);
        assert_eq!(table.row_count(), 0);
        assert!(table.to_string().contains("№ обращения"));
    }
}
