use std::path::Path;

use rusqlite::Connection;

use crate::accounts;
use crate::artifacts::{self, ArtifactStore};
use crate::audits;
use crate::balances;
use crate::error::{AcvError, Result};
use crate::models::UploadStatus;
use crate::parser;

#[derive(Debug)]
pub struct UploadReceipt {
    pub year: i32,
    pub month: u32,
    pub message: String,
}

fn has_spreadsheet_extension(filename: &str) -> bool {
    matches!(
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("xlsx") | Some("xls")
    )
}

/// Ingest one uploaded spreadsheet.
///
/// Phases, in order: extension gate (no transaction), validation (parse,
/// resolve accounts, duplicate check; no writes), artifact storage (durable,
/// outside the transaction), then audit + balance rows and the audit's
/// Success transition inside one transaction. Any error after the transaction
/// opened rolls the database back; a stored artifact is never deleted, so a
/// late failure can leave an orphaned file behind.
pub fn process_upload(
    conn: &mut Connection,
    store: &ArtifactStore,
    file_bytes: &[u8],
    filename: &str,
    content_type: &str,
    uploaded_by: &str,
) -> Result<UploadReceipt> {
    if !has_spreadsheet_extension(filename) {
        return Err(AcvError::UnsupportedFileType);
    }

    // Dropping the transaction on any early return rolls it back.
    let tx = conn.transaction()?;

    let parsed = parser::parse_balance_sheet(file_bytes)?;
    let mut resolved = Vec::with_capacity(parsed.balances.len());
    for (name, amount) in &parsed.balances {
        let account = accounts::find_by_name(&tx, name)?;
        if balances::exists(&tx, account.id, parsed.year, parsed.month)? {
            return Err(AcvError::DuplicatePeriod {
                account: account.name,
                year: parsed.year,
                month: parsed.month,
            });
        }
        resolved.push((account.id, *amount));
    }

    let artifact_name = artifacts::unique_name(filename);
    let location = store.put(&artifact_name, file_bytes, content_type)?;

    let audit_id = audits::create_pending(&tx, filename, &location, uploaded_by)?;
    for (account_id, amount) in &resolved {
        tx.execute(
            "INSERT INTO monthly_balances (account_id, year, month, amount, audit_id) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![account_id, parsed.year, parsed.month, amount, audit_id],
        )?;
    }
    audits::update_status(&tx, audit_id, UploadStatus::Success, None)?;

    tx.commit()?;

    Ok(UploadReceipt {
        year: parsed.year,
        month: parsed.month,
        message: format!(
            "Successfully processed balances for {} {}",
            parser::month_name(parsed.month),
            parsed.year
        ),
    })
}
