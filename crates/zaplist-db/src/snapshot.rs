use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::error::{DbError, Result};

/// SQLite keeps crash-consistency state in these siblings while the main
/// file is open. They must travel with the copy or the engine may see a
/// torn database.
const SIDECAR_SUFFIXES: [&str; 2] = ["-wal", "-shm"];

/// A private, read-only copy of the chat database in a uniquely named
/// temporary directory. All queries run against this copy; the original is
/// never touched after the copy completes.
#[derive(Debug)]
pub struct Snapshot {
    dir: TempDir,
    db_path: PathBuf,
}

impl Snapshot {
    pub async fn create(source: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("zaplist-").tempdir()?;

        let file_name = source
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("ChatStorage.sqlite"));
        let db_path = dir.path().join(file_name);

        tokio::fs::copy(source, &db_path)
            .await
            .map_err(|e| DbError::source_unreadable(source, &e))?;

        for suffix in SIDECAR_SUFFIXES {
            let side = append_suffix(source, suffix);
            if tokio::fs::metadata(&side).await.is_err() {
                continue;
            }
            let dest = append_suffix(&db_path, suffix);
            if let Err(e) = tokio::fs::copy(&side, &dest).await {
                debug!("skipping sidecar {}: {}", side.display(), e);
            }
        }

        Ok(Self { dir, db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Remove the copy, the sidecars and the directory. Removal failures
    /// are logged and swallowed; they must never replace the pipeline's
    /// own result. Dropping an unclosed snapshot removes it too.
    pub fn close(self) {
        if let Err(e) = self.dir.close() {
            debug!("snapshot cleanup: {}", e);
        }
    }
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}
