use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::artifacts::ArtifactStore;
use crate::auth;
use crate::db::get_connection;
use crate::error::{AcvError, Result};
use crate::settings::{get_data_dir, load_settings};
use crate::uploader::process_upload;

fn content_type_for(filename: &str) -> &'static str {
    match Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        _ => "application/octet-stream",
    }
}

fn read_password(username: &str) -> Result<String> {
    // ACV_PASSWORD keeps scripted uploads off the interactive prompt.
    if let Ok(password) = std::env::var("ACV_PASSWORD") {
        return Ok(password);
    }
    Ok(rpassword::prompt_password(format!("Password for {username}: "))?)
}

pub fn run(file: &str, user: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let username = match user {
        Some(u) => u.to_string(),
        None if !settings.default_user.is_empty() => settings.default_user.clone(),
        None => {
            return Err(AcvError::Other(
                "no user given; pass --user or set default_user in settings".to_string(),
            ))
        }
    };

    let data_dir = get_data_dir();
    let mut conn = get_connection(&data_dir.join("acv.db"))?;

    let password = read_password(&username)?;
    let user = auth::authenticate(&conn, &username, &password)?;
    auth::require_role(&user, auth::ROLE_ADMIN)?;

    let path = PathBuf::from(file);
    let bytes = std::fs::read(&path)?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file);

    let store = ArtifactStore::fs(data_dir.join("artifacts"));
    let receipt = process_upload(
        &mut conn,
        &store,
        &bytes,
        filename,
        content_type_for(filename),
        &user.username,
    )?;

    println!("{}", receipt.message.green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(
            content_type_for("june.xlsx"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(content_type_for("june.XLS"), "application/vnd.ms-excel");
        assert_eq!(content_type_for("report.pdf"), "application/octet-stream");
    }
}
