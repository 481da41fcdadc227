use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no data to save")]
    EmptyTable,

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("database error: {0}")]
    Db(#[from] catalog_db::DbError),

    #[error("credentials file not found: {path}")]
    CredentialsNotFound { path: PathBuf },

    #[error("invalid service account credentials in {path}: {reason}")]
    Credentials { path: PathBuf, reason: String },

    #[error("token exchange failed: {0}")]
    Token(String),

    #[error("Sheets API returned HTTP {status}: {body}")]
    SheetsApi { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
