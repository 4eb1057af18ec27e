use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::domain::TVError;

/// The fields of one input line.
pub type Record = Vec<String>;

/// Read the whole csv file into memory.
///
/// The file has no header line, every line is a record. All records must have
/// the same number of fields as the first one. Bytes that are not valid UTF-8
/// are replaced, they do not fail the load.
#[instrument(level = "debug")]
pub fn load(path: &Path) -> Result<Vec<Record>, TVError> {
    let start_time = Instant::now();

    let mut data = Vec::new();
    open(path)?.read_to_end(&mut data)?;
    check_quotes(&data)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(data.as_slice());

    let records = reader
        .byte_records()
        .map(|r| {
            r.map(|record| {
                record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect::<Record>()
            })
        })
        .collect::<Result<Vec<Record>, csv::Error>>()?;

    if records.is_empty() {
        return Err(TVError::EmptyInput(path.to_path_buf()));
    }

    info!(
        "Loaded {} records from {} in {}ms",
        records.len(),
        path.display(),
        start_time.elapsed().as_millis()
    );
    Ok(records)
}

/// Strict quoting rules the csv reader is lenient about.
///
/// A quote may only open a field, a quote inside a quoted field must be
/// doubled or close the field, and the input must not end inside quotes.
fn check_quotes(data: &[u8]) -> Result<(), TVError> {
    let mut line = 1;
    let mut quote_line = 0; // Line the open quoted field started on
    let mut in_quotes = false;
    let mut field_start = true;

    let mut bytes = data.iter().copied().peekable();
    while let Some(b) = bytes.next() {
        if in_quotes {
            match b {
                b'"' => match bytes.peek() {
                    Some(b'"') => {
                        bytes.next();
                    }
                    None | Some(b',' | b'\n' | b'\r') => in_quotes = false,
                    Some(_) => {
                        return Err(TVError::QuoteError {
                            line,
                            message: "extraneous or missing \" in quoted-field",
                        });
                    }
                },
                b'\n' => line += 1,
                _ => {}
            }
        } else {
            match b {
                b',' => field_start = true,
                b'\n' => {
                    line += 1;
                    field_start = true;
                }
                b'"' if field_start => {
                    in_quotes = true;
                    quote_line = line;
                    field_start = false;
                }
                b'"' => {
                    return Err(TVError::QuoteError {
                        line,
                        message: "bare \" in non-quoted-field",
                    });
                }
                _ => field_start = false,
            }
        }
    }

    if in_quotes {
        return Err(TVError::QuoteError {
            line: quote_line,
            message: "unterminated quoted-field",
        });
    }
    Ok(())
}

fn open(path: &Path) -> Result<File, TVError> {
    let not_accessible = |e: std::io::Error| match e.kind() {
        ErrorKind::NotFound => TVError::FileNotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => TVError::PermissionDenied(path.to_path_buf()),
        _ => TVError::IoError(e),
    };

    let metadata = fs::metadata(path).map_err(not_accessible)?;
    if !metadata.is_file() {
        return Err(TVError::LoadingFailed(format!(
            "{} is not a file",
            path.display()
        )));
    }
    debug!("Opening {} ({} bytes)", path.display(), metadata.len());
    File::open(path).map_err(not_accessible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn load_simple_file() {
        let file = csv_file(b"a,bb,ccc\ndddd,e,f\n");
        let records = load(file.path()).unwrap();
        assert_eq!(
            records,
            vec![
                vec!["a".to_string(), "bb".into(), "ccc".into()],
                vec!["dddd".to_string(), "e".into(), "f".into()],
            ]
        );
    }

    #[test]
    fn first_line_is_data() {
        let file = csv_file(b"name,age\nalice,30\n");
        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["name".to_string(), "age".into()]);
    }

    #[test]
    fn load_quoted_fields() {
        let file = csv_file(b"\"hello, world\",\"with \"\"quotes\"\"\"\n\"two\nlines\",x\n");
        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0][0], "hello, world");
        assert_eq!(records[0][1], "with \"quotes\"");
        assert_eq!(records[1][0], "two\nlines");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        match load(&path) {
            Err(TVError::FileNotFound(p)) => assert_eq!(p, path),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load(dir.path()), Err(TVError::LoadingFailed(_))));
    }

    #[test]
    fn ragged_rows_are_a_format_error() {
        let file = csv_file(b"a,b,c\n1,2\n");
        assert!(matches!(load(file.path()), Err(TVError::FormatError(_))));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let file = csv_file(b"caf\xe9,x\n");
        let records = load(file.path()).unwrap();
        assert_eq!(records, vec![vec!["caf\u{FFFD}".to_string(), "x".into()]]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let file = csv_file(b"a,\"bc\nd,e\n");
        match load(file.path()) {
            Err(TVError::QuoteError { line, .. }) => assert_eq!(line, 1),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn bare_quote_is_an_error() {
        let file = csv_file(b"a,b\nc,d\"e\n");
        match load(file.path()) {
            Err(TVError::QuoteError { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn text_after_closing_quote_is_an_error() {
        let file = csv_file(b"\"ab\"c,d\n");
        assert!(matches!(load(file.path()), Err(TVError::QuoteError { .. })));
    }

    #[test]
    fn quoted_fields_with_crlf() {
        let file = csv_file(b"\"a\",\"b\"\"\"\r\nc,\"\"\r\n");
        let records = load(file.path()).unwrap();
        assert_eq!(records[0], vec!["a".to_string(), "b\"".into()]);
        assert_eq!(records[1], vec!["c".to_string(), String::new()]);
    }

    #[test]
    fn empty_file_is_rejected() {
        let file = csv_file(b"");
        assert!(matches!(load(file.path()), Err(TVError::EmptyInput(_))));
    }

    #[test]
    fn dollar_in_file_name_is_literal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report$2024.csv");
        fs::write(&path, "a,b\n").unwrap();
        assert_eq!(load(&path).unwrap(), vec![vec!["a".to_string(), "b".into()]]);
    }
}
