#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub name: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Success,
    Failed,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "success" => Some(Self::Success),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadAudit {
    pub id: i64,
    pub uploaded_at: String,
    pub filename: String,
    pub artifact_location: String,
    pub status: UploadStatus,
    pub error_message: Option<String>,
    pub uploaded_by: Option<String>,
}

/// Intermediate representation from the spreadsheet parser before any DB work.
/// One upload carries exactly five (account name, amount) pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBalanceSet {
    pub year: i32,
    pub month: u32,
    pub balances: Vec<(String, f64)>,
}
