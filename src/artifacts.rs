use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{AcvError, Result};

/// Object store for raw uploaded files. Writes here are durable side effects
/// outside any database transaction and are never rolled back.
#[derive(Debug)]
pub enum ArtifactStore {
    Fs { root: PathBuf },
    #[cfg(test)]
    Failing,
}

/// Content-type tag stored next to each artifact.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArtifactMeta {
    pub content_type: String,
    pub stored_at: String,
}

impl ArtifactStore {
    pub fn fs(root: impl Into<PathBuf>) -> Self {
        Self::Fs { root: root.into() }
    }

    /// Store `bytes` under `name`, tagged with `content_type`. Returns the
    /// dereferenceable location of the stored artifact.
    pub fn put(&self, name: &str, bytes: &[u8], content_type: &str) -> Result<String> {
        match self {
            Self::Fs { root } => {
                std::fs::create_dir_all(root)
                    .map_err(|e| AcvError::ArtifactStore(e.to_string()))?;
                let path = root.join(name);
                std::fs::write(&path, bytes).map_err(|e| AcvError::ArtifactStore(e.to_string()))?;

                let meta = ArtifactMeta {
                    content_type: content_type.to_string(),
                    stored_at: Utc::now().to_rfc3339(),
                };
                let meta_json = serde_json::to_string_pretty(&meta)
                    .map_err(|e| AcvError::ArtifactStore(e.to_string()))?;
                std::fs::write(root.join(format!("{name}.meta.json")), meta_json)
                    .map_err(|e| AcvError::ArtifactStore(e.to_string()))?;

                Ok(path.display().to_string())
            }
            #[cfg(test)]
            Self::Failing => Err(AcvError::ArtifactStore("simulated storage outage".to_string())),
        }
    }
}

/// Globally unique artifact name: UTC timestamp plus a random nonce, keeping
/// the original extension so stored files stay openable.
pub fn unique_name(original_filename: &str) -> String {
    let ext = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();
    format!("{}_{:08x}{ext}", Utc::now().format("%Y%m%d_%H%M%S"), rand::random::<u32>())
}
