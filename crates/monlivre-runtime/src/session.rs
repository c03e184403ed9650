use crate::Result;
use monlivre_types::{Session, UserId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk shape of `session.toml`
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(default)]
    is_admin: bool,
}

/// Locally stored user identifier, the only state that survives between runs
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store living in `session.toml` under the workspace directory
    pub fn in_workspace(data_dir: &Path) -> Self {
        Self::new(data_dir.join("session.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file or blank id loads as `Unauthenticated`
    pub fn load(&self) -> Result<Session> {
        if !self.path.exists() {
            return Ok(Session::Unauthenticated);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let file: SessionFile = toml::from_str(&content)?;

        Ok(match file.user_id {
            Some(id) if !id.trim().is_empty() => Session::Authenticated {
                user_id: UserId::new(id),
                is_admin: file.is_admin,
            },
            _ => Session::Unauthenticated,
        })
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let file = match session {
            Session::Authenticated { user_id, is_admin } => SessionFile {
                user_id: Some(user_id.as_str().to_string()),
                is_admin: *is_admin,
            },
            Session::Unauthenticated => SessionFile::default(),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(&file)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
