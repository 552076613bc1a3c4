//! Workbook files for tests, laid out like the fab export: a title banner,
//! the header row, then one row per month and alarm id.

use std::path::Path;

use calamine::Data;
use rust_xlsxwriter::Workbook;

pub const HEADER: [&str; 4] = ["Month", "Alarm_ID", "Count", "AlarmText"];

pub fn s(v: &str) -> Data {
    Data::String(v.to_string())
}

/// Write `rows` beneath a title row and `header` into sheet `sheet_name`.
/// `Data::Empty` cells are left blank.
pub fn write_workbook(path: &Path, sheet_name: &str, header: &[&str], rows: &[Vec<Data>]) {
    let mut book = Workbook::new();
    let sheet = book.add_worksheet();
    sheet.set_name(sheet_name).unwrap();
    sheet.write_string(0, 0, "Infineon alarm export").unwrap();
    for (c, name) in header.iter().enumerate() {
        sheet.write_string(1, c as u16, *name).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 2;
        for (c, value) in row.iter().enumerate() {
            let c = c as u16;
            match value {
                Data::Int(i) => {
                    sheet.write_number(r, c, *i as f64).unwrap();
                }
                Data::Float(f) => {
                    sheet.write_number(r, c, *f).unwrap();
                }
                Data::String(v) => {
                    sheet.write_string(r, c, v.as_str()).unwrap();
                }
                _ => {}
            }
        }
    }
    book.save(path).unwrap();
}

/// Three valid rows over two months plus a row whose count is "N/A".
pub fn sample_rows() -> Vec<Vec<Data>> {
    vec![
        vec![Data::Int(202401), s("A1"), Data::Int(10), s("E84 timeout")],
        vec![Data::Int(202401), s("A2"), Data::Int(5), s("foup lock failure")],
        vec![Data::Int(202401), s("A3"), s("N/A"), s("Hand origin fault")],
        vec![Data::Int(202402), s("A1"), Data::Int(3), s("E84 timeout")],
    ]
}
