use colored::Colorize;

use crate::auth;
use crate::db::get_connection;
use crate::error::Result;
use crate::settings::get_data_dir;

pub fn run(username: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("acv.db"))?;
    let password = rpassword::prompt_password(format!("Password for {username}: "))?;
    let user = auth::authenticate(&conn, username, &password)?;
    println!("{} {} ({})", "Authenticated:".green(), user.username, user.role);
    Ok(())
}
