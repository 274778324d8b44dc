use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const MAX_SHEET_NAME: usize = 31;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// One worksheet: a header row followed by data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

/// A generated workbook ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

pub fn build_workbook(sheets: &[Sheet]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let names = unique_sheet_names(sheets.iter().map(|s| s.name.as_str()));
    for (sheet, name) in sheets.iter().zip(names) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&name)?;

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (idx, row) in sheet.rows.iter().enumerate() {
            let row_num = (idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(text) => worksheet.write_string(row_num, col, text)?,
                    Cell::Number(n) => worksheet.write_number(row_num, col, *n)?,
                    Cell::Bool(b) => worksheet.write_boolean(row_num, col, *b)?,
                };
            }
        }
    }

    workbook.save_to_buffer()
}

/// Makes names legal worksheet names: no `[]:*?/\`, at most 31 characters,
/// not blank, and unique ignoring case.
pub fn unique_sheet_names<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut taken: Vec<String> = Vec::new();
    let mut names = Vec::new();

    for name in raw {
        let base = sanitize_sheet_name(name);
        let mut candidate = base.clone();
        let mut n = 2;
        while taken.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({n})");
            let keep = MAX_SHEET_NAME.saturating_sub(suffix.chars().count());
            candidate = format!("{}{}", base.chars().take(keep).collect::<String>(), suffix);
            n += 1;
        }
        taken.push(candidate.to_lowercase());
        names.push(candidate);
    }

    names
}

fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '-',
            other => other,
        })
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').trim().to_string();

    if cleaned.is_empty() {
        "Unassigned".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_are_sanitized_and_unique() {
        let names = unique_sheet_names(["6:00 pm", "", "6:00 PM", "  "].into_iter());
        assert_eq!(names, vec!["6-00 pm", "Unassigned", "6-00 PM (2)", "Unassigned (2)"]);
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "a".repeat(40);
        let names = unique_sheet_names([long.as_str(), long.as_str()].into_iter());
        assert_eq!(names[0].chars().count(), 31);
        assert_eq!(names[1].chars().count(), 31);
        assert!(names[1].ends_with(" (2)"));
    }

    #[test]
    fn workbook_is_a_zip_container() {
        let sheet = Sheet {
            name: "Results".to_string(),
            headers: vec!["Name", "Total"],
            rows: vec![vec![Cell::from("Karim"), Cell::Number(42.0)]],
        };
        let bytes = build_workbook(&[sheet]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
