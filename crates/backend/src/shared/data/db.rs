use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Shared application state handed to every axum handler.
///
/// The connection is constructed once in `main` (or by a test) and passed
/// down explicitly; there is no process-global cell, which is what lets the
/// whole stack run against `sqlite::memory:` in tests.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Build a sqlite connection URL from a filesystem path, creating parent
/// directories as needed.
pub fn sqlite_url_from_path(db_file: &Path) -> anyhow::Result<String> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

/// Connect to the database and ensure the schema exists.
///
/// `db_url` is any sqlx sqlite URL, including `sqlite::memory:`.
pub async fn connect(db_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut opts = sea_orm::ConnectOptions::new(db_url.to_string());
    if db_url.contains(":memory:") {
        // Every pooled connection would otherwise get its own empty
        // in-memory database
        opts.max_connections(1);
    }
    let conn = Database::connect(opts).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

/// Minimal schema bootstrap: create the goal table when missing.
/// The UNIQUE constraint on goal_name is the store-level uniqueness guarantee.
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let check_goal_table = r#"
        SELECT name FROM sqlite_master
        WHERE type='table' AND name='goal';
    "#;
    let goal_table_exists = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_goal_table.to_string(),
        ))
        .await?;

    if goal_table_exists.is_empty() {
        tracing::info!("Creating goal table");
        let create_goal_table_sql = r#"
            CREATE TABLE goal (
                id TEXT PRIMARY KEY NOT NULL,
                goal_name TEXT NOT NULL UNIQUE,
                goal_description TEXT NOT NULL,
                goal_end_date TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                resources_link TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_goal_table_sql.to_string(),
        ))
        .await?;
    }

    Ok(())
}
