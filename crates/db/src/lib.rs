//! SQLite connection pool factory and module-driven migration runner.

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use booktrack_kernel::module::Migration;
use booktrack_kernel::settings::DatabaseSettings;

/// Open a connection pool against the configured SQLite database,
/// creating the database file when it does not exist yet.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .with_context(|| format!("invalid database url '{}'", settings.url))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
        .with_context(|| "failed to open database pool")?;

    tracing::info!(url = %settings.url, "database pool ready");

    Ok(pool)
}

/// Apply migrations collected from the module registry, tracking applied
/// ids in a `schema_migrations` table so reruns are no-ops.
pub async fn run_migrations(
    pool: &SqlitePool,
    migrations: Vec<(String, Migration)>,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            module TEXT NOT NULL,
            migration_id TEXT NOT NULL,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (module, migration_id)
        )
        "#,
    )
    .execute(pool)
    .await
    .with_context(|| "failed to create schema_migrations table")?;

    for (module, migration) in migrations {
        let applied: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE module = ? AND migration_id = ?)",
        )
        .bind(&module)
        .bind(migration.id)
        .fetch_one(pool)
        .await?;

        if applied {
            continue;
        }

        tracing::info!(module = %module, migration = migration.id, "applying migration");

        // SQLite executes one statement per call; migration scripts may
        // carry several.
        for statement in migration.up.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            sqlx::query(statement).execute(pool).await.with_context(|| {
                format!("migration '{}/{}' failed", module, migration.id)
            })?;
        }

        sqlx::query("INSERT INTO schema_migrations (module, migration_id) VALUES (?, ?)")
            .bind(&module)
            .bind(migration.id)
            .execute(pool)
            .await?;
    }

    Ok(())
}
