use anyhow::{Context, Result};
use rusqlite::{Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

use saleslens_api::db::{migrations::MIGRATIONS, Built};
use saleslens_api::{GroupResponse, RevenueBucket, SaleResponse, UserResponse};

/// Shared database state
#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
}

impl Db {
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }
}

/// Initialize the database: open connection, enable WAL, run migrations
pub fn init_db(data_dir: &Path) -> Result<Db> {
    std::fs::create_dir_all(data_dir)?;
    let db_path = data_dir.join("saleslens.db");
    let conn = Connection::open(&db_path).context("opening SQLite database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    run_migrations(&conn)?;

    Ok(Db {
        conn: Arc::new(Mutex::new(conn)),
    })
}

/// In-memory database with the full schema, for tests.
#[cfg(test)]
pub fn init_db_in_memory() -> Result<Db> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    run_migrations(&conn)?;
    Ok(Db {
        conn: Arc::new(Mutex::new(conn)),
    })
}

fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !already_applied {
            conn.execute_batch(sql)
                .with_context(|| format!("running migration {name}"))?;
            conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [name])?;
            tracing::info!("Applied migration: {name}");
        }
    }

    Ok(())
}

/// Seed demo users, groups, memberships, and sales when the store is empty.
///
/// Returns `true` if seed data was inserted.
pub fn seed_if_empty(db: &Db) -> Result<bool> {
    let conn = db.conn();
    let user_count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    if user_count > 0 {
        return Ok(false);
    }

    conn.execute_batch(include_str!("../seed.sql"))
        .context("seeding demo data")?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Built-query execution helpers
// ---------------------------------------------------------------------------

/// Convert sea-query bind values into rusqlite-owned values.
fn bind_params(values: &sea_query::Values) -> Vec<rusqlite::types::Value> {
    use rusqlite::types::Value as Sql;
    use sea_query::Value;

    values
        .iter()
        .map(|v| match v {
            Value::Bool(b) => b.map(|b| Sql::Integer(b as i64)).unwrap_or(Sql::Null),
            Value::Int(i) => i.map(|i| Sql::Integer(i as i64)).unwrap_or(Sql::Null),
            Value::BigInt(i) => i.map(Sql::Integer).unwrap_or(Sql::Null),
            Value::Unsigned(u) => u.map(|u| Sql::Integer(u as i64)).unwrap_or(Sql::Null),
            Value::Float(f) => f.map(|f| Sql::Real(f as f64)).unwrap_or(Sql::Null),
            Value::Double(f) => f.map(Sql::Real).unwrap_or(Sql::Null),
            Value::String(s) => s
                .as_ref()
                .map(|s| Sql::Text(s.as_ref().clone()))
                .unwrap_or(Sql::Null),
            _ => Sql::Null,
        })
        .collect()
}

/// Run a built SELECT, mapping every row.
pub fn sq_query_map<T>(
    conn: &Connection,
    built: &Built,
    f: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<Vec<T>> {
    let (sql, values) = built;
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(bind_params(values)), f)?;
    rows.collect()
}

/// Run a built SELECT expected to yield exactly one row.
pub fn sq_query_row<T>(
    conn: &Connection,
    built: &Built,
    f: impl FnOnce(&Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<T> {
    let (sql, values) = built;
    conn.query_row(sql, rusqlite::params_from_iter(bind_params(values)), f)
}

// ---------------------------------------------------------------------------
// Row mappers (column order matches the builders in saleslens-api)
// ---------------------------------------------------------------------------

pub fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserResponse> {
    Ok(UserResponse {
        id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub fn group_from_row(row: &Row<'_>) -> rusqlite::Result<GroupResponse> {
    Ok(GroupResponse {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

pub fn sale_from_row(row: &Row<'_>) -> rusqlite::Result<SaleResponse> {
    Ok(SaleResponse {
        id: row.get(0)?,
        user_id: row.get(1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
    })
}

pub fn bucket_from_row(row: &Row<'_>) -> rusqlite::Result<RevenueBucket> {
    Ok(RevenueBucket {
        bucket: row.get(0)?,
        average_revenue: row.get(1)?,
        sale_count: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_create_schema() {
        let db = init_db_in_memory().unwrap();
        let conn = db.conn();
        for table in ["users", "groups", "user_groups", "sales"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {table}");
        }
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let db = init_db_in_memory().unwrap();
        let conn = db.conn();
        run_migrations(&conn).unwrap();
        let applied: i64 = conn
            .query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied, 1);
    }

    #[test]
    fn test_init_db_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db = init_db(dir.path()).unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_seed_runs_once() {
        let db = init_db_in_memory().unwrap();
        assert!(seed_if_empty(&db).unwrap());
        let users: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert!(users > 0);
        // Second call sees a populated store and does nothing
        assert!(!seed_if_empty(&db).unwrap());
    }
}
