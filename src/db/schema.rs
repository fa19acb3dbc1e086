use rusqlite::Connection;

pub fn init_db(path: &str) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS movies (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                director TEXT NOT NULL,
                year INTEGER NOT NULL,
                cast_list TEXT NOT NULL DEFAULT '[]',
                series TEXT NOT NULL DEFAULT '[]',
                tags TEXT NOT NULL DEFAULT '[]',
                description TEXT,
                video_link TEXT,
                rating INTEGER NOT NULL DEFAULT 0,
                last_watched TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
        [],
    )?;

    Ok(conn)
}
