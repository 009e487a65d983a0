//! Output formatting for CLI commands

use batchscan::export::CSV_HEADER;
use batchscan_db::AssemblyRecord;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};

/// Format a number with thousands separators
///
/// Examples:
/// - 999 -> "999"
/// - 1234567 -> "1,234,567"
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Build a table with headers and rows
pub fn build_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    table
}

/// Print a table with headers and rows
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    println!("{}", build_table(headers, rows));
}

/// Print a batch listing in export column order
pub fn print_records(records: &[AssemblyRecord]) {
    let rows = records
        .iter()
        .map(|r| vec![r.serial_num.clone(), r.batch_code.clone(), r.po_num.clone()])
        .collect();
    print_table(&CSV_HEADER, rows);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_build_table_contains_rows() {
        let table = build_table(
            &CSV_HEADER,
            vec![vec!["SN1001".to_string(), "B200".to_string(), "PO55".to_string()]],
        );
        let rendered = table.to_string();
        assert!(rendered.contains("Serial Number"));
        assert!(rendered.contains("SN1001"));
        assert!(rendered.contains("PO55"));
    }
}
