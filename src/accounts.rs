use rusqlite::Connection;

use crate::error::{AcvError, Result};
use crate::models::Account;

/// Spreadsheet autocorrect turns ASCII apostrophes into U+2019; canonical
/// account names use the ASCII form.
pub fn normalize_name(raw: &str) -> String {
    raw.replace('\u{2019}', "'").trim().to_string()
}

/// Exact-match lookup against canonical account names, after normalization.
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Account> {
    let normalized = normalize_name(name);
    let mut stmt = conn.prepare("SELECT id, name FROM accounts WHERE name = ?1")?;
    stmt.query_row([&normalized], |row| {
        Ok(Account {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => AcvError::UnknownAccount(normalized.clone()),
        other => other.into(),
    })
}

/// Full reference set in insertion order.
pub fn list_all(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare("SELECT id, name FROM accounts ORDER BY id")?;
    let accounts = stmt
        .query_map([], |row| {
            Ok(Account {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(accounts)
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

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Canteen "), "Canteen");
        assert_eq!(normalize_name("CEO\u{2019}s car"), "CEO's car");
        assert_eq!(normalize_name("CEO's car"), "CEO's car");
    }

    #[test]
    fn test_find_by_name() {
        let (_dir, conn) = test_db();
        let account = find_by_name(&conn, "Canteen").unwrap();
        assert_eq!(account.name, "Canteen");
    }

    #[test]
    fn test_find_by_name_normalizes_apostrophes() {
        let (_dir, conn) = test_db();
        let curly = find_by_name(&conn, "CEO\u{2019}s car").unwrap();
        let ascii = find_by_name(&conn, "CEO's car").unwrap();
        assert_eq!(curly.id, ascii.id);
    }

    #[test]
    fn test_find_by_name_is_case_sensitive() {
        let (_dir, conn) = test_db();
        assert!(matches!(
            find_by_name(&conn, "canteen"),
            Err(AcvError::UnknownAccount(_))
        ));
    }

    #[test]
    fn test_find_by_name_unknown() {
        let (_dir, conn) = test_db();
        let err = find_by_name(&conn, "Slush fund").unwrap_err();
        assert_eq!(err.to_string(), "Unknown account: Slush fund");
    }

    #[test]
    fn test_list_all_in_insertion_order() {
        let (_dir, conn) = test_db();
        let names: Vec<String> = list_all(&conn).unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["R&D", "Canteen", "CEO's car", "Marketing", "Parking fines"]);
    }
}
