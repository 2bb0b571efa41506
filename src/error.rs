use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcvError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Only Excel files (.xlsx/.xls) are allowed")]
    UnsupportedFileType,

    #[error("Malformed spreadsheet: {0}")]
    MalformedInput(String),

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Balances for {account} in {month}/{year} already exist")]
    DuplicatePeriod {
        account: String,
        year: i32,
        month: u32,
    },

    #[error("Artifact storage failed: {0}")]
    ArtifactStore(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User '{user}' does not have the '{role}' role")]
    Forbidden { user: String, role: String },

    #[error("Fixtures error: {0}")]
    Fixtures(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AcvError>;
