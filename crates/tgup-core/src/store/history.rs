use rusqlite::params;

use crate::{store::Database, Result};

/// A destination the user picked before.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatHistoryRecord {
    pub chat_id: String,
    pub name: Option<String>,
}

impl ChatHistoryRecord {
    /// Menu label: `Name (id)`, or just the id when unnamed.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({})", self.chat_id),
            None => self.chat_id.clone(),
        }
    }
}

/// Previously used destinations, for pre-populating the chat menu.
#[derive(Clone)]
pub struct ChatHistory {
    db: Database,
}

impl ChatHistory {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    /// All records in insertion order.
    pub fn list(&self) -> Result<Vec<ChatHistoryRecord>> {
        self.db.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT chat_id, chat_name FROM chat_history ORDER BY rowid")?;
            let rows = stmt.query_map([], |row| {
                let chat_id: String = row.get(0)?;
                let name: Option<String> = row.get(1)?;
                Ok(ChatHistoryRecord {
                    chat_id,
                    name: name.filter(|n| !n.trim().is_empty()),
                })
            })?;
            let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
    }

    /// Remember `chat_id`. Keeps the first name if the id is already known.
    pub fn record(&self, chat_id: &str, name: Option<&str>) -> Result<()> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO chat_history(chat_id, chat_name) VALUES(?1, ?2)",
                params![chat_id, name],
            )
        })?;
        Ok(())
    }
}
