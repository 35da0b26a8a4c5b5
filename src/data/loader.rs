use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::model::{CellIssue, Sample, SpecimenRecord};
use crate::config::ReaderConfig;
use crate::error::IngestError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// A directory holding specimen files, checked to exist up front so a bad
/// location is reported once instead of as one failure per specimen.
#[derive(Debug, Clone)]
pub struct SpecimenDirectory {
    root: PathBuf,
}

impl SpecimenDirectory {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, IngestError> {
        let root = path.into();
        if !root.exists() {
            return Err(IngestError::DirectoryNotFound(root));
        }
        if !root.is_dir() {
            return Err(IngestError::NotADirectory(root));
        }
        Ok(SpecimenDirectory { root })
    }

    /// Path of the file for `name`, e.g. `100-001` + `.Dat`.
    pub fn path_for(&self, name: &str, suffix: &str) -> PathBuf {
        self.root.join(format!("{name}{suffix}"))
    }

    /// Read the specimen `name` from `<root>/<name><suffix>`.
    pub fn load(&self, name: &str, suffix: &str, config: &ReaderConfig) -> Result<SpecimenRecord, IngestError> {
        let path = self.path_for(name, suffix);
        let file = File::open(&path).map_err(|source| IngestError::Io {
            specimen: name.to_string(),
            source,
        })?;
        read_specimen(name, file, config)
    }
}

/// Read a specimen file. The specimen is named after the file stem.
pub fn load_file(path: &Path, config: &ReaderConfig) -> Result<SpecimenRecord, IngestError> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string();
    let file = File::open(path).map_err(|source| IngestError::Io {
        specimen: name.clone(),
        source,
    })?;
    read_specimen(&name, file, config)
}

/// Parse delimited text into a [`SpecimenRecord`].
///
/// Layout: `config.header_lines` lines are skipped, every remaining
/// non-empty line is one sample. The first data row fixes the column count;
/// a later row with a different count fails the whole specimen. A cell that
/// is not a finite number (undecodable bytes included) leaves that field
/// absent and is recorded as a [`CellIssue`], the rest of the row is still
/// read. Header lines are discarded unread, whatever their encoding.
pub fn read_specimen<R: Read>(name: &str, source: R, config: &ReaderConfig) -> Result<SpecimenRecord, IngestError> {
    let delimiter = config.delimiter_byte()?;
    let mut input = BufReader::new(source);

    let io_err = |source| IngestError::Io {
        specimen: name.to_string(),
        source,
    };

    let mut skipped = 0;
    let mut line = Vec::new();
    while skipped < config.header_lines {
        line.clear();
        if input.read_until(b'\n', &mut line).map_err(io_err)? == 0 {
            break;
        }
        skipped += 1;
    }
    debug!("{name}: skipped {skipped} header lines");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mapped = config.columns.mapped();
    let mut width: Option<usize> = None;
    let mut samples = Vec::new();
    let mut issues = Vec::new();

    for (row, result) in reader.byte_records().enumerate() {
        let record = result.map_err(|source| IngestError::Csv {
            specimen: name.to_string(),
            source,
        })?;
        let found = record.len();

        match width {
            None => {
                if let Some(&(field, column)) = mapped.iter().find(|(_, col)| *col >= found) {
                    return Err(IngestError::ColumnOutOfRange {
                        specimen: name.to_string(),
                        field,
                        column,
                        width: found,
                    });
                }
                width = Some(found);
            }
            Some(expected) if expected != found => {
                let line = record.position().map_or(0, |p| p.line()) + skipped as u64;
                return Err(IngestError::RowShape {
                    specimen: name.to_string(),
                    line,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }

        let mut sample = Sample::default();
        for &(field, column) in &mapped {
            let cell = record.get(column).unwrap_or_default();
            match parse_cell(cell) {
                Some(value) => sample.set(field, Some(value)),
                None => {
                    let issue = CellIssue {
                        row,
                        column,
                        field,
                        text: String::from_utf8_lossy(cell).into_owned(),
                    };
                    warn!("{name}: {issue}");
                    issues.push(issue);
                }
            }
        }
        samples.push(sample);
    }

    debug!("{name}: read {} samples ({} bad cells)", samples.len(), issues.len());
    Ok(SpecimenRecord::with_issues(name, samples, issues))
}

fn parse_cell(cell: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(cell).ok()?;
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnMap;
    use crate::data::model::Field;

    fn load_disp_config() -> ReaderConfig {
        ReaderConfig {
            header_lines: 2,
            delimiter: ',',
            columns: ColumnMap {
                load: Some(0),
                displacement: Some(1),
                ..ColumnMap::empty()
            },
        }
    }

    #[test]
    fn test_three_rows_exact() {
        let text = "Test 100-001\nLoad,Disp\n0.0,0.0\n12.5,0.125\n25.25,0.5\n";
        let record = read_specimen("100-001", text.as_bytes(), &load_disp_config()).unwrap();

        assert_eq!(record.name(), "100-001");
        assert_eq!(
            record.samples(),
            &[
                Sample { load: Some(0.0), displacement: Some(0.0), ..Default::default() },
                Sample { load: Some(12.5), displacement: Some(0.125), ..Default::default() },
                Sample { load: Some(25.25), displacement: Some(0.5), ..Default::default() },
            ]
        );
        assert!(record.issues().is_empty());
    }

    #[test]
    fn test_bad_cell_keeps_row() {
        let text = "h1\nh2\n1.0,2.0\nabc,3.0\nNaN,4.0\n";
        let record = read_specimen("s", text.as_bytes(), &load_disp_config()).unwrap();

        assert_eq!(record.len(), 3);
        assert_eq!(record.samples()[1].load, None);
        assert_eq!(record.samples()[1].displacement, Some(3.0));
        assert_eq!(record.samples()[2].load, None);

        let issues = record.issues();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].row, 1);
        assert_eq!(issues[0].field, Field::Load);
        assert_eq!(issues[0].text, "abc");
    }

    #[test]
    fn test_latin1_header_is_skipped() {
        let text = b"Temp \xb0C\nLoad,Disp\n1.0,2.0\n3.0,4.0\n";
        let record = read_specimen("s", &text[..], &load_disp_config()).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.samples()[1].load, Some(3.0));
        assert!(record.issues().is_empty());
    }

    #[test]
    fn test_undecodable_cell_keeps_row() {
        let text = b"h\nh\n1.0,2.0\n\xb5,4.0\n5.0,6.0\n";
        let record = read_specimen("s", &text[..], &load_disp_config()).unwrap();

        assert_eq!(record.len(), 3);
        assert_eq!(record.samples()[1].load, None);
        assert_eq!(record.samples()[1].displacement, Some(4.0));
        assert_eq!(record.samples()[2].load, Some(5.0));

        let issues = record.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].row, 1);
        assert_eq!(issues[0].field, Field::Load);
        assert_eq!(issues[0].text, "\u{fffd}");
    }

    #[test]
    fn test_unmapped_fields_stay_absent() {
        let text = "h\nh\n1,2,3,4,5,6\n";
        let record = read_specimen("s", text.as_bytes(), &load_disp_config()).unwrap();
        let sample = record.samples()[0];
        assert_eq!(sample.stress, None);
        assert_eq!(sample.strain, None);
        assert_eq!(sample.time, None);
    }

    #[test]
    fn test_tab_delimiter_and_whitespace() {
        let config = ReaderConfig {
            delimiter: '\t',
            ..load_disp_config()
        };
        let text = "h\nh\n 1.5\t 2.5 \n";
        let record = read_specimen("s", text.as_bytes(), &config).unwrap();
        assert_eq!(record.samples()[0].load, Some(1.5));
        assert_eq!(record.samples()[0].displacement, Some(2.5));
    }

    #[test]
    fn test_row_shape_mismatch_fails() {
        let text = "h\nh\n1,2,3\n4,5\n";
        let err = read_specimen("s", text.as_bytes(), &load_disp_config()).unwrap_err();
        match err {
            IngestError::RowShape { line, expected, found, .. } => {
                assert_eq!(line, 4);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mapped_column_out_of_range() {
        let config = ReaderConfig {
            columns: ColumnMap {
                strain: Some(5),
                ..ColumnMap::empty()
            },
            ..load_disp_config()
        };
        let err = read_specimen("s", "h\nh\n1,2\n".as_bytes(), &config).unwrap_err();
        assert!(matches!(
            err,
            IngestError::ColumnOutOfRange { field: Field::Strain, column: 5, width: 2, .. }
        ));
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let record = read_specimen("s", "h\nh\n".as_bytes(), &load_disp_config()).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            SpecimenDirectory::open(&missing),
            Err(IngestError::DirectoryNotFound(_))
        ));

        let file_path = dir.path().join("plain.txt");
        std::fs::write(&file_path, "x").unwrap();
        assert!(matches!(
            SpecimenDirectory::open(&file_path),
            Err(IngestError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_directory_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("100-002.Dat"), "h\nh\n1,2\n3,4\n").unwrap();

        let specimens = SpecimenDirectory::open(dir.path()).unwrap();
        let record = specimens.load("100-002", ".Dat", &load_disp_config()).unwrap();
        assert_eq!(record.name(), "100-002");
        assert_eq!(record.len(), 2);

        let err = specimens.load("100-003", ".Dat", &load_disp_config()).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn test_load_file_names_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar-7.csv");
        std::fs::write(&path, "h\nh\n1,2\n").unwrap();
        let record = load_file(&path, &load_disp_config()).unwrap();
        assert_eq!(record.name(), "bar-7");
    }
}
