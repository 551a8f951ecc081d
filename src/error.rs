//! Error types for the upload pipeline and the application shell.
//!
//! `UploadError` is the typed taxonomy of everything that can go wrong while
//! turning a spreadsheet into a series: all variants are validation/format
//! errors, none are transient or retryable. Its `Display` output is the exact
//! message shown to the user, always prefixed with [`UPLOAD_ERROR_PREFIX`] so
//! the caller can recognize it as an upload-format problem.
//!
//! `AppError` is the application-level error (message + process exit code)
//! used by the CLI and TUI front-ends.

/// Fixed marker identifying an upload-format error message.
pub const UPLOAD_ERROR_PREFIX: &str = "upload file not correct: ";

/// Everything that can abort an ingestion. No partial series ever accompanies
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Fewer than 2 rows: there is no header plus at least one data row.
    EmptyInput,
    /// The header row resolved neither (or only one of) the two column roles,
    /// or both roles landed on the same column.
    MissingColumns,
    /// The extracted end-date candidate failed date parsing.
    InvalidDate {
        /// 1-based spreadsheet row number.
        row: usize,
        /// Verbatim date-range cell text.
        raw: String,
        /// The candidate we tried to parse as the end date.
        candidate: String,
    },
    /// The index-value cell is not a finite number.
    InvalidValue {
        /// 1-based spreadsheet row number.
        row: usize,
        /// Verbatim value cell text.
        raw: String,
    },
    /// Every data row was skipped; nothing survived the row loop.
    NoValidRows,
    /// The file could not be read at all.
    ReadFailure,
    /// The workbook structure itself could not be parsed.
    MalformedWorkbook,
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{UPLOAD_ERROR_PREFIX}")?;
        match self {
            UploadError::EmptyInput => {
                write!(f, "The file appears to be empty or missing data rows.")
            }
            UploadError::MissingColumns => write!(
                f,
                "Missing required columns. Please ensure you have '日期' (Date Range) and '中原城市領先指數' (CCL Index)."
            ),
            UploadError::InvalidDate { row, raw, candidate } => write!(
                f,
                "Invalid date format at row {row} (\"{raw}\"). Tried to parse \"{candidate}\" as the end date."
            ),
            UploadError::InvalidValue { row, raw } => {
                write!(f, "Invalid index value at row {row} (\"{raw}\").")
            }
            UploadError::NoValidRows => write!(f, "No valid data rows found."),
            UploadError::ReadFailure => write!(f, "Error reading the file."),
            UploadError::MalformedWorkbook => write!(
                f,
                "Failed to parse the file. Ensure it is a valid .xlsx or .csv file."
            ),
        }
    }
}

impl std::error::Error for UploadError {}

/// Application error: a user-facing message plus the process exit code.
///
/// Exit codes:
/// - 2: input/format problems (bad workbook, bad rows)
/// - 3: the file was readable but produced no usable data
/// - 4: runtime failures (terminal setup, export I/O)
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        let exit_code = match err {
            UploadError::NoValidRows => 3,
            _ => 2,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_message_carries_the_marker_prefix() {
        let errors = [
            UploadError::EmptyInput,
            UploadError::MissingColumns,
            UploadError::InvalidDate {
                row: 3,
                raw: "x".to_string(),
                candidate: "y".to_string(),
            },
            UploadError::InvalidValue {
                row: 3,
                raw: "abc".to_string(),
            },
            UploadError::NoValidRows,
            UploadError::ReadFailure,
            UploadError::MalformedWorkbook,
        ];
        for err in errors {
            assert!(err.to_string().starts_with(UPLOAD_ERROR_PREFIX), "{err}");
        }
    }

    #[test]
    fn invalid_date_message_names_row_raw_and_candidate() {
        let err = UploadError::InvalidDate {
            row: 5,
            raw: "2023-01-01 to garbage".to_string(),
            candidate: "garbage".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("row 5"));
        assert!(msg.contains("\"2023-01-01 to garbage\""));
        assert!(msg.contains("\"garbage\""));
    }

    #[test]
    fn invalid_value_message_names_row_and_raw_text() {
        let err = UploadError::InvalidValue {
            row: 4,
            raw: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("row 4"));
        assert!(msg.contains("\"abc\""));
    }

    #[test]
    fn exit_codes_follow_the_taxonomy() {
        assert_eq!(AppError::from(UploadError::NoValidRows).exit_code(), 3);
        assert_eq!(AppError::from(UploadError::EmptyInput).exit_code(), 2);
        assert_eq!(AppError::from(UploadError::ReadFailure).exit_code(), 2);
    }
}
