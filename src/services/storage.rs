//! Output storage - service layer
//!
//! Directory routing and CSV persistence. Output lands under
//! `{period_label}/{ticker}/` - or `data/{ticker}/` when no period could
//! be resolved - and files are overwritten on re-crawls, never merged.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::models::report::{Period, Table, TableKind};

/// Written ahead of the header record so spreadsheet tools detect UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Replaces filesystem-hostile characters in the identifier used as the
/// file-name prefix.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

/// Output directory for one report: keyed by period and ticker, with a
/// `data/` fallback tree when the period is unknown.
pub fn report_dir(root: &Path, period: &Period, stock_code: &str) -> PathBuf {
    if period.is_unknown() {
        root.join("data").join(stock_code)
    } else {
        root.join(period.to_string()).join(stock_code)
    }
}

/// Creates the report directory, parents included. Idempotent.
pub fn ensure_dir(dir: &Path) -> Result<(), StorageError> {
    fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes one table as `{prefix}_baocao_{kind}.csv`: UTF-8 with BOM,
/// header record first, rows as extracted (ragged rows preserved).
pub fn write_table_csv(
    dir: &Path,
    prefix: &str,
    kind: TableKind,
    table: &Table,
) -> Result<PathBuf, StorageError> {
    let path = dir.join(format!("{}_baocao_{}.csv", prefix, kind.suffix()));

    let mut file = File::create(&path).map_err(|source| StorageError::Write {
        path: path.clone(),
        source,
    })?;
    file.write_all(UTF8_BOM).map_err(|source| StorageError::Write {
        path: path.clone(),
        source,
    })?;

    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
    writer
        .write_record(&table.columns)
        .and_then(|_| table.rows.iter().try_for_each(|row| writer.write_record(row)))
        .map_err(|source| StorageError::Csv {
            path: path.clone(),
            source,
        })?;
    writer.flush().map_err(|source| StorageError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn sanitizes_hostile_characters() {
        assert_eq!(sanitize_identifier(r#"PVS:HNX/2024?"#), "PVS_HNX_2024_");
        assert_eq!(sanitize_identifier("PVS"), "PVS");
    }

    #[test]
    fn routes_by_period_and_ticker() {
        let root = Path::new(".");
        assert_eq!(
            report_dir(root, &Period::Quarter { quarter: 2, year: 2024 }, "PVS"),
            PathBuf::from("./Q2.2024/PVS")
        );
        assert_eq!(
            report_dir(root, &Period::Unknown, "PVS"),
            PathBuf::from("./data/PVS")
        );
    }

    #[test]
    fn writes_bom_and_preserves_ragged_rows() {
        let tmp = TempDir::new().unwrap();
        let table = Table {
            columns: vec!["A".into(), "B".into()],
            rows: vec![
                vec!["1".into(), "2".into()],
                vec!["only".into()],
                vec!["x".into(), "y".into(), "z".into()],
            ],
        };

        let path = write_table_csv(tmp.path(), "PVS", TableKind::Cdkt, &table).unwrap();
        assert_eq!(path.file_name().unwrap(), "PVS_baocao_cdkt.csv");

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\xEF\xBB\xBF"));

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(&bytes[3..]);
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].len(), 1);
        assert_eq!(records[2].len(), 3);
    }
}
