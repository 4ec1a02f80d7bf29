pub mod models;
pub mod recipes;

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub type DbPool = Pool<Sqlite>;

const CREATE_RECIPES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS recipes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL DEFAULT '',
    ingredients TEXT NOT NULL DEFAULT '',
    instructions TEXT NOT NULL DEFAULT ''
)
"#;

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Create the data directory of a file-backed SQLite database
async fn ensure_parent_dir(database_url: &str) -> Result<()> {
    if is_memory_url(database_url) {
        return Ok(());
    }

    if let Some(path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    {
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
    }

    Ok(())
}

fn connect_options(database_url: &str) -> Result<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(Error::Connectivity)?
        .create_if_missing(true);
    Ok(options)
}

/// Initialize database connection pool
pub async fn init_pool(database_url: &str) -> Result<DbPool> {
    init_pool_with_config(&DatabaseConfig {
        url: database_url.to_string(),
        max_connections: 5,
        min_connections: 1,
        connection_timeout_seconds: 30,
        idle_timeout_seconds: 600,
    })
    .await
}

/// Initialize database connection pool with custom configuration
pub async fn init_pool_with_config(config: &DatabaseConfig) -> Result<DbPool> {
    ensure_parent_dir(&config.url).await?;

    let options = connect_options(&config.url)?;

    // Every connection to `:memory:` opens its own private database, so the
    // pool is pinned to one connection that is never recycled.
    let pool_options = if is_memory_url(&config.url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .connect_with(options)
        .await
        .map_err(Error::Connectivity)?;

    Ok(pool)
}

/// Ensure the recipes table exists
pub async fn init_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(CREATE_RECIPES_TABLE)
        .execute(pool)
        .await
        .map_err(Error::from_connect)?;
    Ok(())
}

/// Check that the database answers a trivial query
pub async fn ping(pool: &DbPool) -> bool {
    sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_pool() {
        let pool = init_pool("sqlite::memory:").await;
        assert!(pool.is_ok());
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();
        assert!(ping(&pool).await);
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("recipes.db");
        let url = format!("sqlite:{}", path.display());

        let pool = init_pool(&url).await.unwrap();
        init_schema(&pool).await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_unreachable_database_is_connectivity_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file
        let url = format!("sqlite:{}", dir.path().display());

        let result = init_pool(&url).await;
        assert!(matches!(result, Err(Error::Connectivity(_))));
    }
}
