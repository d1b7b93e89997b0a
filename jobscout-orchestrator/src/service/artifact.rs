//! Artifact parsing
//!
//! Reads the worker's workbook and turns the first sheet into job records.
//! The first row is the header row; later sheets are ignored.

use calamine::{Data, ExcelDateTime, Reader, Xlsx, XlsxError};
use chrono::NaiveTime;
use jobscout_core::domain::JobRecord;
use jobscout_core::domain::record::RecordField;
use std::io::{self, Cursor};
use thiserror::Error;

/// Artifact read/parse failures
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse workbook: {0}")]
    Workbook(#[from] XlsxError),

    #[error("artifact parser task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Parses workbook bytes into job records
///
/// A workbook without sheets, an empty first sheet or a header-only sheet all
/// yield an empty sequence.
pub fn parse_workbook(bytes: Vec<u8>) -> Result<Vec<JobRecord>, ArtifactError> {
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes))?;

    let Some(first_sheet) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };

    let range = workbook.worksheet_range(&first_sheet)?;
    Ok(records_from_rows(range.rows()))
}

fn records_from_rows<'a>(mut rows: impl Iterator<Item = &'a [Data]>) -> Vec<JobRecord> {
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    let columns: Vec<Option<RecordField>> = header
        .iter()
        .map(|cell| RecordField::from_header(&cell_text(cell)))
        .collect();

    rows.map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(|text| !text.is_empty()))
        .map(|cells| {
            let mut record = JobRecord::default();
            // Cells past the end of a short row stay as empty strings
            for (field, text) in columns.iter().zip(cells) {
                if let Some(field) = field {
                    record.fill(*field, text);
                }
            }
            record
        })
        .collect()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => date_text(dt),
        other => other.to_string().trim().to_string(),
    }
}

/// Date cells as `YYYY-MM-DD`, with the time only when it is not midnight
fn date_text(dt: &ExcelDateTime) -> String {
    match dt.as_datetime() {
        Some(value) if value.time() == NaiveTime::MIN => value.format("%Y-%m-%d").to_string(),
        Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => dt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{ExcelDateTime as SheetDate, Format, Workbook};

    const HEADERS: [&str; 7] = [
        "title",
        "company",
        "location",
        "platform",
        "source",
        "url",
        "posted_at",
    ];

    fn workbook(rows: &[Vec<&str>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_parses_rows_by_header() {
        let bytes = workbook(&[
            HEADERS.to_vec(),
            vec![
                "HR Manager",
                "Acme",
                "",
                "LinkedIn",
                "site",
                "http://x",
                "2024-01-01",
            ],
        ]);

        let records = parse_workbook(bytes).unwrap();
        assert_eq!(
            records,
            vec![JobRecord {
                platform: "LinkedIn".into(),
                title: "HR Manager".into(),
                company: "Acme".into(),
                location: String::new(),
                source: "site".into(),
                posted_at: "2024-01-01".into(),
                url: "http://x".into(),
            }]
        );
    }

    #[test]
    fn test_header_only_sheet_is_empty() {
        let records = parse_workbook(workbook(&[HEADERS.to_vec()])).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_sheet_is_empty() {
        let records = parse_workbook(workbook(&[])).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_columns_become_empty_strings() {
        let bytes = workbook(&[
            vec!["Title", "Company", "Platform"],
            vec!["Recruiter", "Initech", "Indeed"],
            vec!["Analyst"],
        ]);

        let records = parse_workbook(bytes).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].company, "Initech");
        assert_eq!(records[0].url, "");
        assert_eq!(records[0].posted_at, "");
        assert_eq!(records[1].title, "Analyst");
        assert_eq!(records[1].company, "");
        assert_eq!(records[1].platform, "");
    }

    #[test]
    fn test_blank_rows_are_skipped_and_order_kept() {
        let bytes = workbook(&[
            vec!["title"],
            vec!["first"],
            vec![""],
            vec!["second"],
        ]);

        let titles: Vec<String> = parse_workbook(bytes)
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_only_first_sheet_is_read() {
        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.write_string(0, 0, "title").unwrap();
        first.write_string(1, 0, "from first").unwrap();
        let second = workbook.add_worksheet();
        second.write_string(0, 0, "title").unwrap();
        second.write_string(1, 0, "from second").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let records = parse_workbook(bytes).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "from first");
    }

    #[test]
    fn test_numeric_cells_render_as_text() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "title").unwrap();
        sheet.write_string(0, 1, "posted_at").unwrap();
        sheet.write_number(1, 0, 42.0).unwrap();
        sheet.write_number(1, 1, 2.5).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let records = parse_workbook(bytes).unwrap();
        assert_eq!(records[0].title, "42");
        assert_eq!(records[0].posted_at, "2.5");
    }

    #[test]
    fn test_date_cells_render_as_dates() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "title").unwrap();
        sheet.write_string(0, 1, "posted_at").unwrap();

        let day = Format::new().set_num_format("yyyy-mm-dd");
        let stamp = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        sheet.write_string(1, 0, "day only").unwrap();
        sheet
            .write_datetime_with_format(1, 1, &SheetDate::from_ymd(2024, 1, 1).unwrap(), &day)
            .unwrap();
        sheet.write_string(2, 0, "with time").unwrap();
        let with_time = SheetDate::from_ymd(2024, 1, 1)
            .unwrap()
            .and_hms(18, 0, 0)
            .unwrap();
        sheet
            .write_datetime_with_format(2, 1, &with_time, &stamp)
            .unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let records = parse_workbook(bytes).unwrap();
        assert_eq!(records[0].posted_at, "2024-01-01");
        assert_eq!(records[1].posted_at, "2024-01-01 18:00:00");
    }

    #[test]
    fn test_first_filled_column_wins_for_shared_field() {
        let bytes = workbook(&[
            vec!["title", "posted_at", "Date Posted"],
            vec!["first", "2024-01-01", ""],
            vec!["second", "", "2024-02-02"],
            vec!["third", "2024-03-03", "2024-04-04"],
        ]);

        let dates: Vec<String> = parse_workbook(bytes)
            .unwrap()
            .into_iter()
            .map(|r| r.posted_at)
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-02-02", "2024-03-03"]);
    }

    #[test]
    fn test_corrupt_artifact_is_an_error() {
        let err = parse_workbook(b"definitely not a workbook".to_vec()).unwrap_err();
        assert!(matches!(err, ArtifactError::Workbook(_)), "{:?}", err);
    }
}
