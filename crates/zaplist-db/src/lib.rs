mod decode;
mod error;
mod query;
mod snapshot;

pub use error::DbError;
pub use query::{RECENT_CHATS_LIMIT, recent_chats_sql, run_query};
pub use snapshot::Snapshot;

use std::path::PathBuf;

use zaplist_core::ChatRow;

use crate::error::Result;

/// Read-only access to a live ChatStorage.sqlite. Every fetch snapshots
/// the database into a private temp dir, queries the copy through the
/// sqlite3 binary and removes the copy again.
#[derive(Debug)]
pub struct ChatDb {
    source: PathBuf,
    include_groups: bool,
}

impl ChatDb {
    pub fn new(source: PathBuf, include_groups: bool) -> Self {
        Self {
            source,
            include_groups,
        }
    }

    pub fn source(&self) -> &std::path::Path {
        &self.source
    }

    /// One full pipeline run. The snapshot is removed after the query
    /// phase whether it succeeded or not, and a cleanup hiccup never
    /// replaces the query's own result.
    pub async fn fetch_recent(&self) -> Result<Vec<ChatRow>> {
        let snapshot = Snapshot::create(&self.source).await?;
        let sql = recent_chats_sql(self.include_groups);
        let result = run_query(snapshot.db_path(), &sql).await;
        snapshot.close();
        result
    }
}
