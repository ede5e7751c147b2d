use rusqlite::Connection;

pub fn create_tables(conn: &Connection) -> Result<(), rusqlite::Error> {
    // Upload ledger
    conn.execute(
        "CREATE TABLE IF NOT EXISTS uploaded (
            path TEXT PRIMARY KEY,
            chat_id TEXT
        )",
        [],
    )?;

    // Chat history
    conn.execute(
        "CREATE TABLE IF NOT EXISTS chat_history (
            chat_id TEXT PRIMARY KEY,
            chat_name TEXT
        )",
        [],
    )?;

    // Migration: older databases were created without these columns.
    let _ = conn.execute("ALTER TABLE uploaded ADD COLUMN chat_id TEXT", []);
    let _ = conn.execute("ALTER TABLE chat_history ADD COLUMN chat_name TEXT", []);

    Ok(())
}
