use thiserror::Error;

/// Fatal ingestion failures. Any of these aborts the whole upload.
///
/// Row-level problems are not errors in this sense; they are collected as
/// [`crate::ingestion::RowError`] values alongside the accepted records.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Invalid file format. Please upload an Excel file (.xlsx, .xls) or CSV file.")]
    UnsupportedFormat { file_name: String },

    #[error("File size exceeds {} limit. Please upload a smaller file.", size_label(.limit))]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Excel file appears to be empty. Please check your file.")]
    EmptyWorkbook,

    #[error("No data found in the Excel sheet. Please check your file.")]
    EmptySheet,

    #[error("No valid data found. Errors:\n{details}")]
    NoValidData { details: String },

    #[error("Failed to parse file: {0}")]
    Decode(String),

    #[error("Failed to parse file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::Decode(err.to_string())
    }
}

impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        IngestError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;

const MIB: u64 = 1024 * 1024;

/// `5MB` for whole mebibytes, one decimal above 1 MiB, bytes below.
fn size_label(bytes: &u64) -> String {
    let bytes = *bytes;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= MIB {
        format!("{:.1}MB", bytes as f64 / MIB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_too_large_message_uses_limit_in_mb() {
        let err = IngestError::FileTooLarge {
            size: 6 * 1024 * 1024,
            limit: 5 * 1024 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "File size exceeds 5MB limit. Please upload a smaller file."
        );
    }

    #[test]
    fn test_file_too_large_message_below_one_mb() {
        let err = IngestError::FileTooLarge {
            size: 64,
            limit: 16,
        };
        assert_eq!(
            err.to_string(),
            "File size exceeds 16 bytes limit. Please upload a smaller file."
        );

        let err = IngestError::FileTooLarge {
            size: 2 * MIB,
            limit: MIB + MIB / 2,
        };
        assert!(err.to_string().starts_with("File size exceeds 1.5MB limit."));
    }

    #[test]
    fn test_no_valid_data_embeds_details() {
        let err = IngestError::NoValidData {
            details: "Row 2: Missing required fields - year".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No valid data found. Errors:\nRow 2: Missing required fields - year"
        );
    }
}
