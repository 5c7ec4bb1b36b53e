use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("cannot read chat database at {}: {reason}", path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    #[error("sqlite3 query failed: {0}")]
    QueryExecutionFailed(String),

    #[error("unexpected sqlite3 output: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DbError {
    /// The dominant real-world failure is the copy of the live database.
    /// Keep the not-found and permission cases distinguishable so the user
    /// message can name the right remedy.
    pub(crate) fn source_unreadable(path: &Path, err: &std::io::Error) -> Self {
        let reason = match err.kind() {
            ErrorKind::NotFound => "file not found".to_string(),
            ErrorKind::PermissionDenied => {
                "permission denied (the database is read-protected)".to_string()
            }
            _ => err.to_string(),
        };
        DbError::SourceUnreadable {
            path: path.to_path_buf(),
            reason,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            DbError::SourceUnreadable { reason, .. } if reason.starts_with("permission denied")
        )
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
