//! Database connection pool

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

const MIGRATIONS: [(&str, &str); 2] = [
    ("001_initial_schema", include_str!("../../migrations/001_initial_schema.sql")),
    ("002_properties", include_str!("../../migrations/002_properties.sql")),
];

fn is_memory(database_path: &str) -> bool {
    database_path.contains(":memory:")
}

/// Create a new SQLite connection pool.
///
/// An in-memory database lives and dies with its connection, so it gets a
/// single connection that is never recycled.
pub async fn create_pool(database_path: &str) -> Result<SqlitePool, sqlx::Error> {
    if is_memory(database_path) {
        let options = SqliteConnectOptions::from_str(database_path)?.foreign_keys(true);
        return SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await;
    }

    if let Some(parent) = Path::new(database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
}

/// Run database migrations. Every statement is idempotent, so this is safe
/// to call on each start.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for (name, sql) in MIGRATIONS {
        tracing::debug!("Applying migration {}", name);
        for stmt in split_statements(sql) {
            sqlx::query(&stmt).execute(pool).await?;
        }
    }

    Ok(())
}

/// Split a migration script into executable statements.
///
/// Drops `--` comments and `PRAGMA` lines (pragmas are set on the connection
/// options instead). Semicolons inside string literals or parentheses do not
/// end a statement.
fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_string = false;

    for line in sql.lines() {
        let line = if in_string {
            line
        } else {
            match line.find("--") {
                Some(idx) if !line[..idx].contains('\'') => &line[..idx],
                _ => line,
            }
        };

        for c in line.chars() {
            match c {
                '\'' => in_string = !in_string,
                '(' if !in_string => depth += 1,
                ')' if !in_string => depth = depth.saturating_sub(1),
                ';' if !in_string && depth == 0 => {
                    push_statement(&mut statements, &current);
                    current.clear();
                    continue;
                }
                _ => {}
            }
            current.push(c);
        }
        current.push('\n');
    }
    push_statement(&mut statements, &current);

    statements
}

fn push_statement(statements: &mut Vec<String>, raw: &str) {
    let stmt = raw.trim();
    if !stmt.is_empty() && !stmt.to_ascii_uppercase().starts_with("PRAGMA") {
        statements.push(stmt.to_string());
    }
}

/// Initialize database - create pool and run migrations
pub async fn init_database(database_path: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = create_pool(database_path).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
