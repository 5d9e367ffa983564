#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// One cell of a fixture worksheet.
#[derive(Clone, Debug)]
pub enum Data {
    Blank,
    /// Inline string (`t="inlineStr"`)
    Text(String),
    /// Shared string table entry (`t="s"`)
    Shared(String),
    Number(f64),
    /// Date serial number styled with the built-in date format 14
    Date(u32),
    Boolean(bool),
    Error(String),
}

pub fn text(value: &str) -> Data {
    Data::Text(value.to_owned())
}

pub fn shared(value: &str) -> Data {
    Data::Shared(value.to_owned())
}

pub fn number(value: f64) -> Data {
    Data::Number(value)
}

/// A header row made of shared strings, as Excel writes it.
pub fn header(names: &[&str]) -> Vec<Data> {
    names.iter().map(|name| shared(name)).collect()
}

/// Minimal xlsx writer producing workbooks the way Excel lays them out.
#[derive(Default)]
pub struct Book {
    sheets: Vec<(String, Vec<Vec<Data>>)>,
}

impl Book {
    pub fn new() -> Self {
        Book::default()
    }

    pub fn sheet(mut self, name: &str, rows: Vec<Vec<Data>>) -> Self {
        self.sheets.push((name.to_owned(), rows));
        self
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("could not create {}", path.display()))?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        let mut shared_strings = Vec::<String>::new();
        let worksheets: Vec<String> = self
            .sheets
            .iter()
            .map(|(_, rows)| worksheet(rows, &mut shared_strings))
            .collect();

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(CONTENT_TYPES.as_bytes())?;

        zip.start_file("xl/workbook.xml", options)?;
        zip.write_all(self.workbook().as_bytes())?;

        zip.start_file("xl/_rels/workbook.xml.rels", options)?;
        zip.write_all(self.relationships().as_bytes())?;

        zip.start_file("xl/styles.xml", options)?;
        zip.write_all(STYLES.as_bytes())?;

        zip.start_file("xl/sharedStrings.xml", options)?;
        zip.write_all(shared_strings_part(&shared_strings).as_bytes())?;

        for (index, content) in worksheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;
            zip.write_all(content.as_bytes())?;
        }
        zip.finish()?;
        Ok(())
    }

    fn workbook(&self) -> String {
        let sheets: String = self
            .sheets
            .iter()
            .enumerate()
            .map(|(index, (name, _))| {
                format!(
                    r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                    escape(name),
                    index + 1,
                    index + 1
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><workbookPr date1904="false"/><sheets>{sheets}</sheets></workbook>"#
        )
    }

    fn relationships(&self) -> String {
        let mut relationships: String = (1..=self.sheets.len())
            .map(|index| {
                format!(
                    r#"<Relationship Id="rId{index}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{index}.xml"/>"#
                )
            })
            .collect();
        let next = self.sheets.len() + 1;
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{next}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#
        ));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
            next + 1
        ));
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{relationships}</Relationships>"#
        )
    }
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/><xf numFmtId="14" fontId="0" fillId="0" borderId="0" applyNumberFormat="1"/></cellXfs></styleSheet>"#;

fn shared_strings_part(strings: &[String]) -> String {
    let items: String = strings
        .iter()
        .map(|string| format!("<si><t>{}</t></si>", escape(string)))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{items}</sst>"#,
        strings.len()
    )
}

fn worksheet(rows: &[Vec<Data>], shared_strings: &mut Vec<String>) -> String {
    let mut content = String::new();
    for (row, cells) in rows.iter().enumerate() {
        if cells.iter().all(|cell| matches!(cell, Data::Blank)) {
            continue;
        }
        content.push_str(&format!(r#"<row r="{}">"#, row + 1));
        for (col, cell) in cells.iter().enumerate() {
            let reference = format!("{}{}", column_name(col), row + 1);
            let xml = match cell {
                Data::Blank => continue,
                Data::Text(value) => format!(r#"<c r="{reference}" t="inlineStr"><is><t>{}</t></is></c>"#, escape(value)),
                Data::Shared(value) => {
                    let index = match shared_strings.iter().position(|string| string == value) {
                        Some(index) => index,
                        None => {
                            shared_strings.push(value.to_owned());
                            shared_strings.len() - 1
                        }
                    };
                    format!(r#"<c r="{reference}" t="s"><v>{index}</v></c>"#)
                }
                Data::Number(value) => format!(r#"<c r="{reference}"><v>{value}</v></c>"#),
                Data::Date(serial) => format!(r#"<c r="{reference}" s="1"><v>{serial}</v></c>"#),
                Data::Boolean(value) => format!(r#"<c r="{reference}" t="b"><v>{}</v></c>"#, u8::from(*value)),
                Data::Error(value) => format!(r#"<c r="{reference}" t="e"><v>{}</v></c>"#, escape(value)),
            };
            content.push_str(&xml);
        }
        content.push_str("</row>");
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{content}</sheetData></worksheet>"#
    )
}

fn column_name(mut col: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    name
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub const EMPLOYEES: [&str; 4] = ["Kirk", "Spock", "McCoy", "Uhura"];

/// The timesheet used across the load tests: 343 rows, 55 of them for Kirk.
///
/// Dates are text in `MM/DD/YY` form, hours are plain numbers.
pub fn timesheet() -> Vec<Vec<Data>> {
    let first_day = chrono::NaiveDate::from_ymd_opt(2006, 1, 2).unwrap_or_default();
    let mut rows = vec![header(&["Date", "Employee", "Hours worked", "Status"])];
    for index in 0..343usize {
        let employee = if index % 6 == 0 && index < 330 {
            EMPLOYEES[0]
        } else {
            EMPLOYEES[1 + index % 3]
        };
        let day = first_day + chrono::Duration::days((index / 4) as i64);
        rows.push(vec![
            text(&day.format("%m/%d/%y").to_string()),
            shared(employee),
            number(if index % 2 == 0 { 8.0 } else { 7.5 }),
            shared(if index % 5 == 0 { "Pending" } else { "Approved" }),
        ]);
    }
    rows
}
