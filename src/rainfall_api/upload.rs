//! CSV files uploaded for retraining.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Columns the service expects, in order.
pub const EXPECTED_HEADER: [&str; 10] = [
    "date",
    "cloud_cover",
    "sunshine",
    "global_radiation",
    "max_temp",
    "mean_temp",
    "min_temp",
    "precipitation",
    "pressure",
    "snow_depth",
];

/// Multipart field name used for the dataset.
pub const UPLOAD_FIELD: &str = "file";
/// File name reported to the service regardless of the local name.
pub const UPLOAD_FILE_NAME: &str = "new_data.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{} is not a CSV file", .0.display())]
    NotCsv(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("The uploaded file is empty")]
    Empty,
    #[error("The uploaded file is not UTF-8 text")]
    NotText,
    #[error("Unexpected CSV header {found:?}; expected {}", expected_header_line())]
    HeaderMismatch { found: String },
}

/// A dataset held in memory for the current session.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    file_name: String,
    bytes: Arc<[u8]>,
}

impl UploadedFile {
    /// Read and validate a CSV file from disk.
    pub fn load(path: &Path) -> Result<Self, UploadError> {
        if !has_csv_extension(path) {
            return Err(UploadError::NotCsv(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|source| UploadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UPLOAD_FILE_NAME.to_string());
        Self::from_bytes(file_name, bytes)
    }

    /// Validate in-memory CSV contents.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(UploadError::Empty);
        }
        let text = std::str::from_utf8(&bytes).map_err(|_| UploadError::NotText)?;
        let header = text.lines().next().unwrap_or_default();
        if !header_matches(header) {
            return Err(UploadError::HeaderMismatch {
                found: header.trim_start_matches('\u{feff}').trim().to_string(),
            });
        }
        Ok(Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        })
    }

    /// Name of the file on the user's machine.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Non-blank lines after the header.
    pub fn data_rows(&self) -> usize {
        String::from_utf8_lossy(&self.bytes)
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .count()
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The expected header as it appears in a file.
pub fn expected_header_line() -> String {
    EXPECTED_HEADER.join(",")
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn header_matches(line: &str) -> bool {
    let cells: Vec<&str> = line
        .trim_start_matches('\u{feff}')
        .trim_end_matches('\r')
        .split(',')
        .map(|cell| cell.trim().trim_matches('"'))
        .collect();
    cells == EXPECTED_HEADER
}
