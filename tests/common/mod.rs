//! Shared fixtures: builds input workbooks on disk

#![allow(dead_code)] // each test binary uses a different subset

use calamine::{open_workbook_auto, Reader};
use rust_xlsxwriter::{Format, Workbook};
use shift_checker::excel::range_to_sheet;
use shift_checker::types::Sheet;
use std::path::Path;

/// A cell for the fixture builder
#[derive(Clone)]
pub enum Cell {
    Blank,
    Text(&'static str),
    Number(f64),
    /// Excel serial written with a date number format
    Date(f64),
}

pub use Cell::{Blank, Date, Number, Text};

/// A sheet for the fixture builder
pub struct SheetSpec {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

pub fn write_workbook(path: &Path, sheets: &[SheetSpec]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for spec in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(spec.name).unwrap();
        for (col, header) in spec.headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        for (row_idx, row) in spec.rows.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Blank => {}
                    Text(s) => {
                        worksheet.write_string(row_num, col, *s).unwrap();
                    }
                    Number(n) => {
                        worksheet.write_number(row_num, col, *n).unwrap();
                    }
                    Date(serial) => {
                        worksheet
                            .write_number_with_format(row_num, col, *serial, &date_format)
                            .unwrap();
                    }
                }
            }
        }
    }

    workbook.save(path).unwrap();
}

pub fn shift_sheet(rows: Vec<Vec<Cell>>) -> SheetSpec {
    SheetSpec {
        name: "Shift_Data",
        headers: vec!["Enterprise id", "Name", "Shift B dates", "Shift C dates"],
        rows,
    }
}

pub fn time_sheet(rows: Vec<Vec<Cell>>) -> SheetSpec {
    SheetSpec {
        name: "FG",
        headers: vec!["Email", "Project", "Time Entry Date"],
        rows,
    }
}

/// Standard input: three employees, one with a missing day
pub fn write_standard_input(path: &Path) {
    write_workbook(
        path,
        &[
            shift_sheet(vec![
                vec![Text("alice"), Text("Alice"), Text("01,02,3"), Blank],
                vec![Text("bob"), Text("Bob"), Blank, Text("4.5")],
                vec![Text("carol"), Text("Carol"), Number(7.0), Text("08")],
            ]),
            time_sheet(vec![
                vec![Text("Alice.Smith@corp.com"), Text("P1"), Text("2024-03-01")],
                vec![Text("alice.smith@corp.com"), Text("P1"), Text("2024-03-02")],
                vec![Text("bob@corp.com"), Text("P2"), Date(45355.0)],
                vec![Text("bob@corp.com"), Text("P2"), Text("03/05/2024")],
                vec![Text("carol@corp.com"), Text("P3"), Text("03.07.2024")],
                vec![Text("carol@corp.com"), Text("P3"), Text("2024-03-08")],
                vec![Text("carol@corp.com"), Text("P3"), Text("unknown")],
            ]),
        ],
    );
}

/// Read one sheet of a workbook back
pub fn read_sheet(path: &Path, name: &str) -> Sheet {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range(name).unwrap();
    range_to_sheet(name, &range)
}

pub fn sheet_names(path: &Path) -> Vec<String> {
    let workbook = open_workbook_auto(path).unwrap();
    workbook.sheet_names()
}
