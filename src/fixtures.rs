use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::auth::{ROLE_ADMIN, ROLE_USER};
use crate::error::{AcvError, Result};

/// Reference data loaded by the persistence bootstrap. The built-in defaults
/// mirror the deployment seed; an operator can override either list with a
/// JSON fixtures file passed to `acv init`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default = "default_accounts")]
    pub accounts: Vec<String>,
    #[serde(default = "default_users")]
    pub users: Vec<UserFixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFixture {
    pub username: String,
    pub password: String,
    pub role: String,
}

fn default_accounts() -> Vec<String> {
    ["R&D", "Canteen", "CEO's car", "Marketing", "Parking fines"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_users() -> Vec<UserFixture> {
    vec![
        UserFixture {
            username: "admin@99x".to_string(),
            password: "Admin123!".to_string(),
            role: ROLE_ADMIN.to_string(),
        },
        UserFixture {
            username: "user@99x".to_string(),
            password: "User123!".to_string(),
            role: ROLE_USER.to_string(),
        },
    ]
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            accounts: default_accounts(),
            users: default_users(),
        }
    }
}

pub fn load(path: Option<&Path>) -> Result<Fixtures> {
    let Some(path) = path else {
        return Ok(Fixtures::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| AcvError::Fixtures(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| AcvError::Fixtures(format!("cannot parse {}: {e}", path.display())))
}
