use comfy_table::{Cell, Table};

use crate::audits;
use crate::db::get_connection;
use crate::error::Result;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("acv.db"))?;
    let audits = audits::list_all(&conn)?;

    if audits.is_empty() {
        println!("No uploads recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Uploaded At", "File", "Status", "By", "Artifact"]);
    for audit in audits {
        table.add_row(vec![
            Cell::new(audit.id),
            Cell::new(audit.uploaded_at),
            Cell::new(audit.filename),
            Cell::new(audit.status.as_str()),
            Cell::new(audit.uploaded_by.unwrap_or_default()),
            Cell::new(audit.artifact_location),
        ]);
    }
    println!("Upload audit trail\n{table}");
    Ok(())
}
