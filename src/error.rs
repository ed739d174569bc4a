// region:    --- Imports
use std::path::PathBuf;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Catalogue Errors
/// 카탈로그 로드 오류 (서비스 시작 불가)
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("catalogue file {path:?} could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalogue is malformed: {0}")]
    Malformed(#[from] csv::Error),

    #[error("catalogue workbook is malformed: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("catalogue is missing column {0:?}")]
    MissingColumn(&'static str),

    #[error("row {row}: column {column:?} has invalid value {value:?}")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("catalogue contains no products")]
    Empty,

    #[error("product code {0:?} appears more than once")]
    DuplicateProduct(String),

    #[error("product {code:?} has invalid price {price}")]
    InvalidPrice { code: String, price: f64 },
}
// endregion: --- Catalogue Errors

// region:    --- Validation Errors
/// 입찰 검증 오류 (사용자가 수정 후 재제출 가능)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingFields,

    #[error("Incorrect bid amount format")]
    InvalidBidFormat,

    #[error("Bid Amount must be equal to start price or greater.")]
    BidTooLow { bid: i64, price: f64 },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::InvalidBidFormat => "INVALID_BID_FORMAT",
            Self::BidTooLow { .. } => "BID_TOO_LOW",
        }
    }
}
// endregion: --- Validation Errors

// region:    --- Persistence Errors
/// 저장소 오류 (입찰 미기록, 재시도 가능)
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("export write failed: {0}")]
    Export(#[from] csv::Error),

    #[error("workbook export failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("export task failed: {0}")]
    ExportTask(#[from] tokio::task::JoinError),

    #[error("export file error: {0}")]
    Io(#[from] std::io::Error),
}
// endregion: --- Persistence Errors

// region:    --- Session Errors
/// 세션 상태 오류
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(u64),

    #[error("no bid form is open; start a bid first")]
    FormNotOpen,

    #[error("no product selected")]
    NoProductSelected,
}
// endregion: --- Session Errors

// region:    --- Bid Errors
/// 입찰 확정 흐름 전체의 오류
#[derive(Debug, Error)]
pub enum BidError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
// endregion: --- Bid Errors

// region:    --- Config Errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path:?} could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file is not valid TOML: {0}")]
    Invalid(#[from] toml::de::Error),
}
// endregion: --- Config Errors
