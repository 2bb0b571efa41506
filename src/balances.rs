use rusqlite::Connection;

use crate::error::Result;

/// Existence check behind the duplicate guard. Read-only; the schema's
/// UNIQUE (account_id, year, month) constraint is the authoritative backstop
/// under concurrent uploads.
pub fn exists(conn: &Connection, account_id: i64, year: i32, month: u32) -> Result<bool> {
    let mut stmt = conn
        .prepare("SELECT 1 FROM monthly_balances WHERE account_id = ?1 AND year = ?2 AND month = ?3")?;
    Ok(stmt.exists(rusqlite::params![account_id, year, month])?)
}

/// Most recent (year, month) with any balances, or None on an empty table.
pub fn latest_period(conn: &Connection) -> Result<Option<(i32, u32)>> {
    let mut stmt = conn
        .prepare("SELECT year, month FROM monthly_balances ORDER BY year DESC, month DESC LIMIT 1")?;
    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => Ok(Some((row.get(0)?, row.get(1)?))),
        None => Ok(None),
    }
}

/// (account name, amount) pairs for one period, in account insertion order.
pub fn for_period(conn: &Connection, year: i32, month: u32) -> Result<Vec<(String, f64)>> {
    let mut stmt = conn.prepare(
        "SELECT a.name, mb.amount FROM monthly_balances mb \
         JOIN accounts a ON a.id = mb.account_id \
         WHERE mb.year = ?1 AND mb.month = ?2 \
         ORDER BY mb.account_id",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![year, month], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};
    use crate::fixtures::Fixtures;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        let fixtures = Fixtures {
            users: Vec::new(),
            ..Fixtures::default()
        };
        init_db(&conn, &fixtures).unwrap();
        (dir, conn)
    }

    fn add_balance(conn: &Connection, account_id: i64, year: i32, month: u32, amount: f64) {
        conn.execute(
            "INSERT OR IGNORE INTO upload_audits (id, uploaded_at, filename, artifact_location, status) \
             VALUES (1, '2023-06-30T00:00:00Z', 'test.xlsx', '/tmp/test.xlsx', 'success')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO monthly_balances (account_id, year, month, amount, audit_id) VALUES (?1, ?2, ?3, ?4, 1)",
            rusqlite::params![account_id, year, month, amount],
        )
        .unwrap();
    }

    #[test]
    fn test_exists() {
        let (_dir, conn) = test_db();
        assert!(!exists(&conn, 1, 2023, 6).unwrap());
        add_balance(&conn, 1, 2023, 6, 100.0);
        assert!(exists(&conn, 1, 2023, 6).unwrap());
        assert!(!exists(&conn, 1, 2023, 7).unwrap());
        assert!(!exists(&conn, 2, 2023, 6).unwrap());
    }

    #[test]
    fn test_latest_period_empty() {
        let (_dir, conn) = test_db();
        assert_eq!(latest_period(&conn).unwrap(), None);
    }

    #[test]
    fn test_latest_period_orders_by_year_then_month() {
        let (_dir, conn) = test_db();
        add_balance(&conn, 1, 2023, 12, 1.0);
        add_balance(&conn, 1, 2024, 1, 2.0);
        add_balance(&conn, 1, 2023, 6, 3.0);
        assert_eq!(latest_period(&conn).unwrap(), Some((2024, 1)));
    }

    #[test]
    fn test_for_period_joins_names_in_account_order() {
        let (_dir, conn) = test_db();
        add_balance(&conn, 2, 2023, 6, 200.0);
        add_balance(&conn, 1, 2023, 6, 100.0);
        let rows = for_period(&conn, 2023, 6).unwrap();
        assert_eq!(rows, vec![("R&D".to_string(), 100.0), ("Canteen".to_string(), 200.0)]);
    }

    #[test]
    fn test_for_period_other_month_is_empty() {
        let (_dir, conn) = test_db();
        add_balance(&conn, 1, 2023, 6, 100.0);
        assert!(for_period(&conn, 2023, 7).unwrap().is_empty());
    }
}
