use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::fixtures;
use crate::settings::{default_data_dir, save_settings, shellexpand_path, Settings};

pub fn run(data_dir: Option<&str>, fixtures_file: Option<&str>) -> Result<()> {
    let dir = match data_dir {
        Some(d) => PathBuf::from(shellexpand_path(d)),
        None => default_data_dir(),
    };
    std::fs::create_dir_all(&dir)?;

    let fixtures = fixtures::load(fixtures_file.map(Path::new))?;

    let db_path = dir.join("acv.db");
    let conn = get_connection(&db_path)?;
    init_db(&conn, &fixtures)?;

    save_settings(&Settings {
        data_dir: dir.to_string_lossy().to_string(),
        ..Settings::default()
    })?;

    let accounts: i64 = conn.query_row("SELECT count(*) FROM accounts", [], |r| r.get(0))?;
    let users: i64 = conn.query_row("SELECT count(*) FROM users", [], |r| r.get(0))?;

    println!("{}", "acv is ready.".green());
    println!("Database:  {}", db_path.display());
    println!("Accounts:  {accounts}");
    println!("Users:     {users}");
    Ok(())
}
