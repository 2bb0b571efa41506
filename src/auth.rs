use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rusqlite::{Connection, OptionalExtension};

use crate::error::{AcvError, Result};
use crate::models::User;

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_USER: &str = "User";

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AcvError::Other(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

/// Look the user up and check the password. Unknown username and wrong
/// password are indistinguishable to the caller.
pub fn authenticate(conn: &Connection, username: &str, password: &str) -> Result<User> {
    let mut stmt =
        conn.prepare("SELECT id, username, password_hash, role FROM users WHERE username = ?1")?;
    let user = stmt
        .query_row([username], |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                role: row.get(3)?,
            })
        })
        .optional()?;

    match user {
        Some(user) if verify_password(password, &user.password_hash) => Ok(user),
        _ => Err(AcvError::InvalidCredentials),
    }
}

pub fn require_role(user: &User, role: &str) -> Result<()> {
    if user.role == role {
        Ok(())
    } else {
        Err(AcvError::Forbidden {
            user: user.username.clone(),
            role: role.to_string(),
        })
    }
}
