use crate::balances;
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::parser::month_name;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join("acv.db");

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;
        let accounts: i64 = conn.query_row("SELECT count(*) FROM accounts", [], |r| r.get(0))?;
        let users: i64 = conn.query_row("SELECT count(*) FROM users", [], |r| r.get(0))?;
        let rows: i64 = conn.query_row("SELECT count(*) FROM monthly_balances", [], |r| r.get(0))?;
        let uploads: i64 = conn.query_row("SELECT count(*) FROM upload_audits", [], |r| r.get(0))?;

        println!();
        println!("Accounts:   {accounts}");
        println!("Users:      {users}");
        println!("Balances:   {rows}");
        println!("Uploads:    {uploads}");

        if let Some((year, month)) = balances::latest_period(&conn)? {
            println!("Latest:     {} {year}", month_name(month));
        }
    } else {
        println!();
        println!("Database not found. Run `acv init` to set up.");
    }

    Ok(())
}
