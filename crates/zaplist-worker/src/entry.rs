use chrono::{DateTime, Utc};

use zaplist_core::{JidKind, format_digits};

/// One chat as presented to the user: normalized, enriched, ready to
/// render and to deep-link into.
#[derive(Debug, Clone)]
pub struct ChatEntry {
    pub jid: String,
    pub kind: JidKind,
    pub display_name: String,
    /// Canonical dialing digits; `None` for groups, LIDs and anything
    /// that would not normalize.
    pub phone: Option<String>,
    pub last_message: Option<DateTime<Utc>>,
    pub preview: Option<String>,
}

impl ChatEntry {
    /// URI that opens this chat in WhatsApp. Only phone-backed chats can
    /// be deep-linked.
    pub fn deep_link(&self) -> Option<String> {
        self.phone
            .as_ref()
            .map(|digits| format!("whatsapp://send?phone={digits}"))
    }

    /// Phone with display separators. The underlying digits are untouched.
    pub fn display_phone(&self) -> Option<String> {
        self.phone.as_deref().map(format_digits)
    }

    /// Case-insensitive substring match over name, dialing digits and the
    /// raw JID. An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.display_name.to_lowercase().contains(&q)
            || self.jid.to_lowercase().contains(&q)
            || self.phone.as_deref().is_some_and(|p| p.contains(&q))
    }
}
