use serde::{Deserialize, Deserializer, Serialize};

/// One row of the recent-chats query, as it comes off the sqlite3 output.
///
/// Fields other than the JID are nullable in ChatStorage.sqlite, and the
/// JID column has been observed to arrive as a bare number for imported
/// sessions, so everything is coerced here at the boundary rather than
/// trusted downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRow {
    #[serde(deserialize_with = "string_or_number")]
    pub jid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "lastDate", default, deserialize_with = "lenient_f64")]
    pub last_date: Option<f64>,
    #[serde(default)]
    pub preview: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for jid, got {other}"
        ))),
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
