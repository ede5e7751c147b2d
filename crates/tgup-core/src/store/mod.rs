//! SQLite-backed persistence: the upload ledger and the chat history.
//!
//! One connection is opened per process and shared by both tables. `Database` is a
//! cheap clone around it; the connection closes when the last clone is dropped.

pub mod history;
pub mod ledger;
mod schema;

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::Result;

pub use history::{ChatHistory, ChatHistoryRecord};
pub use ledger::Ledger;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        schema::create_tables(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn ledger(&self) -> Ledger {
        Ledger::new(self.clone())
    }

    pub fn chat_history(&self) -> ChatHistory {
        ChatHistory::new(self.clone())
    }

    /// Run `f` with exclusive access to the connection.
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        // A panic while holding the lock leaves the connection itself intact.
        let guard = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        Ok(f(&guard)?)
    }
}
