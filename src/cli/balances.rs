use comfy_table::{Cell, Table};

use crate::balances;
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::parser::month_name;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("acv.db"))?;

    let Some((year, month)) = balances::latest_period(&conn)? else {
        println!("No balances uploaded yet.");
        return Ok(());
    };

    let rows = balances::for_period(&conn, year, month)?;
    let mut table = Table::new();
    table.set_header(vec!["Account", "Balance"]);
    for (name, amount) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(money(amount))]);
    }
    println!("Balances for {} {year}\n{table}", month_name(month));
    Ok(())
}
