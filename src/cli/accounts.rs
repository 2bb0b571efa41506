use comfy_table::{Cell, Table};

use crate::accounts;
use crate::db::get_connection;
use crate::error::Result;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("acv.db"))?;
    let accounts = accounts::list_all(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for account in accounts {
        table.add_row(vec![Cell::new(account.id), Cell::new(account.name)]);
    }
    println!("Accounts\n{table}");
    Ok(())
}
