use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use zaplist_core::{ChatRow, SQLITE_BIN};

use crate::decode::{decode_json, decode_table};
use crate::error::{DbError, Result};

pub const RECENT_CHATS_LIMIT: u32 = 200;

/// The one query this tool runs. `include_groups` widens the filter from
/// individual sessions to every session with a JID.
pub fn recent_chats_sql(include_groups: bool) -> String {
    let filter = if include_groups {
        "ZCONTACTJID IS NOT NULL"
    } else {
        "ZCONTACTJID LIKE '%@s.whatsapp.net'"
    };
    format!(
        "SELECT ZCONTACTJID AS jid, ZPARTNERNAME AS name, \
         ZLASTMESSAGEDATE AS lastDate, ZLASTMESSAGETEXT AS preview \
         FROM ZWACHATSESSION \
         WHERE {filter} \
         ORDER BY ZLASTMESSAGEDATE DESC \
         LIMIT {RECENT_CHATS_LIMIT};"
    )
}

/// Run the query against the snapshot with exactly two attempts: the JSON
/// output mode first, then the CSV mode for sqlite3 builds that predate
/// `-json`. A JSON-mode failure of any kind is soft; only a failed CSV
/// attempt surfaces as an error.
pub async fn run_query(db: &Path, sql: &str) -> Result<Vec<ChatRow>> {
    match run_json(db, sql).await {
        Ok(rows) => return Ok(rows),
        Err(e) => debug!("json output mode unavailable, trying csv: {}", e),
    }
    run_csv(db, sql).await
}

async fn run_json(db: &Path, sql: &str) -> Result<Vec<ChatRow>> {
    let output = invoke(db, &["-readonly", "-json"], sql).await?;
    if !output.status.success() {
        return Err(DbError::QueryExecutionFailed(stderr_text(&output)));
    }
    decode_json(&output.stdout)
}

async fn run_csv(db: &Path, sql: &str) -> Result<Vec<ChatRow>> {
    let output = invoke(db, &["-readonly", "-csv", "-header"], sql).await?;
    if !output.status.success() {
        return Err(DbError::QueryExecutionFailed(stderr_text(&output)));
    }
    Ok(decode_table(&String::from_utf8_lossy(&output.stdout)))
}

async fn invoke(db: &Path, flags: &[&str], sql: &str) -> Result<std::process::Output> {
    debug!("invoking {} {:?} on {}", SQLITE_BIN, flags, db.display());
    Command::new(SQLITE_BIN)
        .args(flags)
        .arg(db)
        .arg(sql)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| DbError::QueryExecutionFailed(format!("failed to spawn {SQLITE_BIN}: {e}")))
}

fn stderr_text(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_filters_individual_chats_by_default() {
        let sql = recent_chats_sql(false);
        assert!(sql.contains("ZCONTACTJID LIKE '%@s.whatsapp.net'"));
        assert!(sql.contains("ORDER BY ZLASTMESSAGEDATE DESC"));
        assert!(sql.contains("LIMIT 200"));
    }

    #[test]
    fn test_sql_widens_for_groups() {
        let sql = recent_chats_sql(true);
        assert!(sql.contains("ZCONTACTJID IS NOT NULL"));
        assert!(!sql.contains("LIKE"));
    }

    // Whether sqlite3 is installed or not, a non-database file must walk
    // through both output modes and come back as QueryExecutionFailed.
    #[tokio::test]
    async fn test_garbage_file_fails_after_both_attempts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-db.sqlite");
        tokio::fs::write(&path, b"definitely not sqlite").await.unwrap();

        let err = run_query(&path, &recent_chats_sql(false)).await.unwrap_err();
        assert!(matches!(err, DbError::QueryExecutionFailed(_)));
    }
}
