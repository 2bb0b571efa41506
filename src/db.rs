use std::path::Path;

use rusqlite::Connection;

use crate::auth;
use crate::error::Result;
use crate::fixtures::Fixtures;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS upload_audits (
    id INTEGER PRIMARY KEY,
    uploaded_at TEXT NOT NULL,
    filename TEXT NOT NULL,
    artifact_location TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    error_message TEXT,
    uploaded_by TEXT
);

CREATE TABLE IF NOT EXISTS monthly_balances (
    id INTEGER PRIMARY KEY,
    account_id INTEGER NOT NULL,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL,
    amount REAL NOT NULL,
    audit_id INTEGER NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (account_id) REFERENCES accounts(id),
    FOREIGN KEY (audit_id) REFERENCES upload_audits(id),
    UNIQUE (account_id, year, month)
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// Create the schema and seed reference data. Accounts and users are only
/// seeded into an empty table, so re-running against an existing database is
/// harmless.
pub fn init_db(conn: &Connection, fixtures: &Fixtures) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let count: i64 = conn.query_row("SELECT count(*) FROM accounts", [], |row| row.get(0))?;
    if count == 0 {
        for name in &fixtures.accounts {
            conn.execute("INSERT INTO accounts (name) VALUES (?1)", [name])?;
        }
    }

    let count: i64 = conn.query_row("SELECT count(*) FROM users", [], |row| row.get(0))?;
    if count == 0 {
        for user in &fixtures.users {
            let hash = auth::hash_password(&user.password)?;
            conn.execute(
                "INSERT INTO users (username, password_hash, role) VALUES (?1, ?2, ?3)",
                rusqlite::params![user.username, hash, user.role],
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["accounts", "users", "upload_audits", "monthly_balances"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn, &Fixtures::default()).unwrap();
        let count: i64 = conn.query_row("SELECT count(*) FROM accounts", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn test_init_db_seeds_accounts_in_order() {
        let (_dir, conn) = test_db();
        let names: Vec<String> = conn
            .prepare("SELECT name FROM accounts ORDER BY id")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(names, vec!["R&D", "Canteen", "CEO's car", "Marketing", "Parking fines"]);
    }

    #[test]
    fn test_init_db_seeds_users_with_hashed_passwords() {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        let fixtures = Fixtures {
            accounts: vec!["Cash".to_string()],
            users: vec![crate::fixtures::UserFixture {
                username: "admin@99x".to_string(),
                password: "Admin123!".to_string(),
                role: "Admin".to_string(),
            }],
        };
        init_db(&conn, &fixtures).unwrap();
        let hash: String = conn
            .query_row("SELECT password_hash FROM users WHERE username = 'admin@99x'", [], |r| r.get(0))
            .unwrap();
        assert_ne!(hash, "Admin123!");
        assert!(auth::verify_password("Admin123!", &hash));
    }

    #[test]
    fn test_balance_period_unique_constraint() {
        let (_dir, conn) = test_db();
        conn.execute(
            "INSERT INTO upload_audits (uploaded_at, filename, artifact_location, status) \
             VALUES ('2023-06-30T00:00:00Z', 'june.xlsx', '/tmp/june.xlsx', 'success')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO monthly_balances (account_id, year, month, amount, audit_id) VALUES (1, 2023, 6, 100.0, 1)",
            [],
        )
        .unwrap();
        let err = conn.execute(
            "INSERT INTO monthly_balances (account_id, year, month, amount, audit_id) VALUES (1, 2023, 6, 200.0, 1)",
            [],
        );
        assert!(err.is_err(), "duplicate (account, year, month) must be rejected");
    }
}
