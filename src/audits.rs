use chrono::Utc;
use rusqlite::Connection;

use crate::error::Result;
use crate::models::{UploadAudit, UploadStatus};

/// Record an upload attempt whose artifact is durably stored. Returns the new
/// audit id so balance rows can reference their provenance.
pub fn create_pending(
    conn: &Connection,
    filename: &str,
    artifact_location: &str,
    uploaded_by: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO upload_audits (uploaded_at, filename, artifact_location, status, uploaded_by) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            Utc::now().to_rfc3339(),
            filename,
            artifact_location,
            UploadStatus::Pending.as_str(),
            uploaded_by,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_status(
    conn: &Connection,
    audit_id: i64,
    status: UploadStatus,
    error_message: Option<&str>,
) -> Result<()> {
    conn.execute(
        "UPDATE upload_audits SET status = ?1, error_message = coalesce(?2, error_message) WHERE id = ?3",
        rusqlite::params![status.as_str(), error_message, audit_id],
    )?;
    Ok(())
}

/// Upload trail, newest first.
pub fn list_all(conn: &Connection) -> Result<Vec<UploadAudit>> {
    let mut stmt = conn.prepare(
        "SELECT id, uploaded_at, filename, artifact_location, status, error_message, uploaded_by \
         FROM upload_audits ORDER BY id DESC",
    )?;
    let audits = stmt
        .query_map([], |row| {
            let status: String = row.get(4)?;
            Ok(UploadAudit {
                id: row.get(0)?,
                uploaded_at: row.get(1)?,
                filename: row.get(2)?,
                artifact_location: row.get(3)?,
                status: UploadStatus::parse(&status).unwrap_or(UploadStatus::Failed),
                error_message: row.get(5)?,
                uploaded_by: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(audits)
}
