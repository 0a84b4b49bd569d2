/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables and
 * connects the optional PostgreSQL database.
 *
 * # Environment
 *
 * | Variable                | Default | Meaning                                   |
 * |-------------------------|---------|-------------------------------------------|
 * | `SERVER_PORT`           | 3000    | HTTP listen port                          |
 * | `DATABASE_URL`          | unset   | Postgres URL; unset means in-memory store |
 * | `ARCHIVE_HOUR_UTC`      | 15      | Hour (UTC) the daily archival fires       |
 * | `ARCHIVE_MINUTE_UTC`    | 0       | Minute (UTC) the daily archival fires     |
 * | `RECLAIM_INTERVAL_SECS` | 3600    | Orphan sweep interval                     |
 * | `WORKSPACE_IDS`         | empty   | Comma list seeding the in-memory directory|
 *
 * # Error Handling
 *
 * Malformed values are configuration errors and stop startup. A database
 * that can't be reached is logged and the server falls back to in-memory
 * stores.
 */

use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

use crate::shared::{ArchiveConfig, ConfigError};

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub archive: ArchiveConfig,
    /// Workspaces known to the in-memory directory when there is no database
    pub seed_workspaces: Vec<String>,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let port = parse_var(&lookup, "SERVER_PORT")?.unwrap_or(3000);

        let mut archive = ArchiveConfig::builder();
        if let Some(hour) = parse_var(&lookup, "ARCHIVE_HOUR_UTC")? {
            archive = archive.archive_hour_utc(hour);
        }
        if let Some(minute) = parse_var(&lookup, "ARCHIVE_MINUTE_UTC")? {
            archive = archive.archive_minute_utc(minute);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "RECLAIM_INTERVAL_SECS")? {
            archive = archive.reclaim_interval(Duration::from_secs(secs));
        }

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let seed_workspaces = lookup("WORKSPACE_IDS")
            .map(|ids| {
                ids.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            port,
            database_url,
            archive: archive.build()?,
            seed_workspaces,
        })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::InvalidValue { var, value }),
        },
    }
}

/// Connect to the database and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if no URL is configured or the connection fails
pub async fn load_database(database_url: Option<&str>) -> DatabaseConfig {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Archived logs will only be kept in memory.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to in-memory stores.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            // The tables may already exist from an earlier deploy
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
