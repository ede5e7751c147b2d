use std::path::Path;

use rusqlite::{params, types::Value, OptionalExtension};

use crate::{domain::Destination, store::Database};

/// Persistent set of files that were already delivered.
///
/// Keys are the exact paths the uploader saw, so callers should pass canonical
/// paths if they want reruns from another working directory to match. UTF-8 paths
/// are stored as TEXT; anything else is stored as a BLOB of the raw OS bytes, so
/// names that differ only in invalid bytes never share a record.
#[derive(Clone)]
pub struct Ledger {
    db: Database,
}

impl Ledger {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    /// True iff `path` has a ledger record. Lookup failures read as "not uploaded".
    pub fn is_uploaded(&self, path: &Path) -> bool {
        let key = path_key(path);
        let found = self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT 1 FROM uploaded WHERE path = ?1",
                params![key],
                |_| Ok(()),
            )
            .optional()
        });

        match found {
            Ok(hit) => hit.is_some(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ledger lookup failed");
                false
            }
        }
    }

    /// Record `path` as delivered. Idempotent; storage failures are logged, not returned.
    pub fn mark_uploaded(&self, path: &Path, destination: Option<&Destination>) {
        let key = path_key(path);
        let chat_id = destination.map(|d| d.to_string());
        let res = self.db.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO uploaded(path, chat_id) VALUES(?1, ?2)",
                params![key, chat_id],
            )
        });

        if let Err(e) = res {
            tracing::warn!(path = %path.display(), error = %e, "failed to record upload");
        }
    }
}

fn path_key(path: &Path) -> Value {
    match path.to_str() {
        Some(s) => Value::Text(s.to_string()),
        None => Value::Blob(os_bytes(path)),
    }
}

#[cfg(unix)]
fn os_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(windows)]
fn os_bytes(path: &Path) -> Vec<u8> {
    use std::os::windows::ffi::OsStrExt;
    path.as_os_str()
        .encode_wide()
        .flat_map(u16::to_le_bytes)
        .collect()
}

#[cfg(not(any(unix, windows)))]
fn os_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}
