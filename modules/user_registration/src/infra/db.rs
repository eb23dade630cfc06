//! SQLite connection setup: a sqlx pool with per-connection PRAGMAs, handed to SeaORM.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::SqlitePoolOptions;

/// Connection options.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Maximum number of connections in the pool. In-memory databases always use one.
    pub max_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    pub acquire_timeout: Option<Duration>,
    /// Busy timeout applied via PRAGMA busy_timeout.
    pub sqlite_busy_timeout: Option<Duration>,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            acquire_timeout: Some(Duration::from_secs(30)),
            sqlite_busy_timeout: Some(Duration::from_millis(5_000)),
        }
    }
}

pub fn is_memory_dsn(dsn: &str) -> bool {
    dsn.contains(":memory:") || dsn.contains("mode=memory")
}

/// Open a SQLite database and wrap it in a SeaORM connection.
///
/// Every in-memory connection is its own database, so an in-memory pool is
/// pinned to a single long-lived connection.
pub async fn connect(dsn: &str, opts: &ConnectOpts) -> Result<DatabaseConnection> {
    if !dsn.starts_with("sqlite:") {
        bail!("Unsupported database DSN '{dsn}': only sqlite is supported");
    }
    let memory = is_memory_dsn(dsn);

    let mut o = SqlitePoolOptions::new();
    if memory {
        o = o
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else if let Some(n) = opts.max_conns {
        o = o.max_connections(n);
    }
    if let Some(t) = opts.acquire_timeout {
        o = o.acquire_timeout(t);
    }

    let busy = opts.sqlite_busy_timeout;
    o = o.after_connect(move |conn, _meta| {
        Box::pin(async move {
            if !memory {
                sqlx::query("PRAGMA journal_mode = WAL")
                    .execute(&mut *conn)
                    .await?;
                sqlx::query("PRAGMA synchronous = NORMAL")
                    .execute(&mut *conn)
                    .await?;
            }
            if let Some(ms) = busy {
                // PRAGMA can't use bind parameters
                let ms = i64::try_from(ms.as_millis()).unwrap_or(i64::MAX);
                let stmt = format!("PRAGMA busy_timeout = {ms}");
                sqlx::query(&stmt).execute(&mut *conn).await?;
            }
            Ok(())
        })
    });

    let dsn = with_create_mode(dsn);
    let pool = o
        .connect(&dsn)
        .await
        .with_context(|| format!("failed to connect to '{dsn}'"))?;
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// File databases are created on first connect unless the DSN picks a mode itself.
fn with_create_mode(dsn: &str) -> String {
    if is_memory_dsn(dsn) || dsn.contains("mode=") {
        return dsn.to_owned();
    }
    let sep = if dsn.contains('?') { '&' } else { '?' };
    format!("{dsn}{sep}mode=rwc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_dsns_are_detected() {
        assert!(is_memory_dsn("sqlite::memory:"));
        assert!(is_memory_dsn("sqlite://:memory:"));
        assert!(is_memory_dsn("sqlite:file:db1?mode=memory&cache=shared"));
        assert!(!is_memory_dsn("sqlite:///tmp/users.db"));
    }

    #[test]
    fn file_dsns_get_create_mode() {
        assert_eq!(
            with_create_mode("sqlite:///tmp/users.db"),
            "sqlite:///tmp/users.db?mode=rwc"
        );
        assert_eq!(
            with_create_mode("sqlite:///tmp/users.db?cache=shared"),
            "sqlite:///tmp/users.db?cache=shared&mode=rwc"
        );
        assert_eq!(
            with_create_mode("sqlite:///tmp/users.db?mode=ro"),
            "sqlite:///tmp/users.db?mode=ro"
        );
        assert_eq!(with_create_mode("sqlite::memory:"), "sqlite::memory:");
    }

    #[tokio::test]
    async fn rejects_non_sqlite_dsn() {
        let err = connect("postgres://localhost/db", &ConnectOpts::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("only sqlite"));
    }

    #[tokio::test]
    async fn memory_database_keeps_state_across_queries() {
        use sea_orm::{ConnectionTrait, Statement};

        let db = connect("sqlite::memory:", &ConnectOpts::default())
            .await
            .unwrap();
        db.execute_unprepared("CREATE TABLE t (x INTEGER)").await.unwrap();
        db.execute_unprepared("INSERT INTO t VALUES (1)").await.unwrap();
        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                "SELECT COUNT(*) AS n FROM t",
            ))
            .await
            .unwrap()
            .unwrap();
        let n: i64 = row.try_get("", "n").unwrap();
        assert_eq!(n, 1);
    }
}
