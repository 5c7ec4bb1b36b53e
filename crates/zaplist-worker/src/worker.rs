use tracing::info;

use zaplist_core::{ChatRow, Config, classify, cocoa_to_utc, format_digits, normalize_jid};
use zaplist_db::{ChatDb, DbError};

use crate::entry::ChatEntry;
use crate::error::{Result, WorkerError};

#[derive(Debug)]
pub struct ZaplistWorker {
    db: ChatDb,
    default_country: Option<String>,
}

impl ZaplistWorker {
    /// Rejects a config whose resolved database path is empty or has no
    /// file name, before anything touches the filesystem.
    pub fn new(config: &Config) -> Result<Self> {
        let source = config.resolved_db_path();
        if source.as_os_str().is_empty() || source.file_name().is_none() {
            return Err(WorkerError::BadDbPath(source.display().to_string()));
        }
        let db = ChatDb::new(source, config.include_groups);
        Ok(Self {
            db,
            default_country: config.default_country.clone(),
        })
    }

    /// One refresh = one snapshot-query-decode run. Rows come back already
    /// sorted newest-first by the query.
    pub async fn refresh(&self) -> Result<Vec<ChatEntry>> {
        let rows = self.db.fetch_recent().await?;
        info!("loaded {} chat sessions from {}", rows.len(), self.db.source().display());
        Ok(rows
            .into_iter()
            .map(|row| self.entry_from_row(row))
            .collect())
    }

    fn entry_from_row(&self, row: ChatRow) -> ChatEntry {
        let kind = classify(&row.jid);
        let phone = normalize_jid(&row.jid, self.default_country.as_deref());
        let last_message = row.last_date.and_then(cocoa_to_utc);

        // Name priority: stored partner name, else the phone, else the
        // raw JID (groups without a subject end up here).
        let display_name = row
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| phone.as_deref().map(format_digits))
            .unwrap_or_else(|| row.jid.clone());

        ChatEntry {
            jid: row.jid,
            kind,
            display_name,
            phone,
            last_message,
            preview: row.preview,
        }
    }

    /// Borrowed view of `entries` filtered by a search query.
    pub fn filter<'a>(entries: &'a [ChatEntry], query: &str) -> Vec<&'a ChatEntry> {
        entries.iter().filter(|e| e.matches(query)).collect()
    }
}

/// The single user-visible message for a failed refresh. Snapshot and
/// query failures both land here; the permission case carries its remedy.
pub fn user_notification(err: &WorkerError) -> String {
    match err {
        WorkerError::Db(db_err @ DbError::SourceUnreadable { .. }) => {
            if db_err.is_permission_denied() {
                format!(
                    "{db_err}. Grant your terminal Full Disk Access in \
                     System Settings > Privacy & Security, then retry."
                )
            } else {
                format!("{db_err}. Set dbPath in the config or ZAPLIST_DB if WhatsApp keeps its database elsewhere.")
            }
        }
        other => format!("Could not load chats: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zaplist_core::JidKind;

    fn worker(country: Option<&str>) -> ZaplistWorker {
        ZaplistWorker::new(&Config {
            db_path: Some("/nonexistent/ChatStorage.sqlite".to_string()),
            default_country: country.map(str::to_string),
            include_groups: false,
        })
        .unwrap()
    }

    #[test]
    fn test_empty_db_path_is_rejected() {
        let err = ZaplistWorker::new(&Config {
            db_path: Some(String::new()),
            default_country: None,
            include_groups: false,
        })
        .unwrap_err();
        assert!(matches!(err, WorkerError::BadDbPath(_)));
    }

    fn row(jid: &str, name: Option<&str>, last_date: Option<f64>) -> ChatRow {
        ChatRow {
            jid: jid.to_string(),
            name: name.map(str::to_string),
            last_date,
            preview: Some("hey".to_string()),
        }
    }

    #[test]
    fn test_user_row_is_enriched() {
        let entry =
            worker(None).entry_from_row(row("15551234567@s.whatsapp.net", Some("Ana"), Some(0.0)));
        assert_eq!(entry.kind, JidKind::User);
        assert_eq!(entry.display_name, "Ana");
        assert_eq!(entry.phone.as_deref(), Some("15551234567"));
        assert_eq!(
            entry.last_message.unwrap().to_rfc3339(),
            "2001-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_nameless_user_falls_back_to_formatted_phone() {
        let entry = worker(None).entry_from_row(row("15551234567@s.whatsapp.net", None, None));
        assert_eq!(entry.display_name, "1-555-123-4567");
    }

    #[test]
    fn test_blank_name_is_treated_as_missing() {
        let entry =
            worker(None).entry_from_row(row("15551234567@s.whatsapp.net", Some("  "), None));
        assert_eq!(entry.display_name, "1-555-123-4567");
    }

    #[test]
    fn test_group_row_keeps_jid_and_no_phone() {
        let entry = worker(Some("US")).entry_from_row(row("123-456@g.us", None, None));
        assert_eq!(entry.kind, JidKind::Group);
        assert!(entry.phone.is_none());
        assert_eq!(entry.display_name, "123-456@g.us");
    }

    #[test]
    fn test_country_hint_reaches_normalization() {
        let entry = worker(Some("US")).entry_from_row(row("5551234567@s.whatsapp.net", None, None));
        assert_eq!(entry.phone.as_deref(), Some("15551234567"));
    }

    #[test]
    fn test_filter_narrows_entries() {
        let w = worker(None);
        let entries: Vec<ChatEntry> = vec![
            w.entry_from_row(row("15551234567@s.whatsapp.net", Some("Ana"), None)),
            w.entry_from_row(row("5511999999999@s.whatsapp.net", Some("Bruno"), None)),
        ];
        let hits = ZaplistWorker::filter(&entries, "bruno");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_name, "Bruno");
    }

    #[tokio::test]
    async fn test_refresh_surfaces_source_unreadable() {
        let err = worker(None).refresh().await.unwrap_err();
        assert!(matches!(err, WorkerError::Db(DbError::SourceUnreadable { .. })));
    }

    #[test]
    fn test_permission_notification_names_the_remedy() {
        let err = WorkerError::Db(DbError::SourceUnreadable {
            path: "/x/ChatStorage.sqlite".into(),
            reason: "permission denied (the database is read-protected)".to_string(),
        });
        let msg = user_notification(&err);
        assert!(msg.contains("permission denied"));
        assert!(msg.contains("Full Disk Access"));
    }

    #[test]
    fn test_not_found_notification_points_at_config() {
        let err = WorkerError::Db(DbError::SourceUnreadable {
            path: "/x/ChatStorage.sqlite".into(),
            reason: "file not found".to_string(),
        });
        let msg = user_notification(&err);
        assert!(msg.contains("dbPath"));
    }
}
