use std::path::{Path, PathBuf};

use sqlx::SqlitePool;

use crate::settings::Settings;

/// Shared application context handed to modules during init, start, and
/// route construction. Cloning is cheap: the pool is reference-counted.
#[derive(Clone)]
pub struct AppContext {
    settings: Settings,
    pool: SqlitePool,
    assets_dir: PathBuf,
}

impl AppContext {
    pub fn new(settings: Settings, pool: SqlitePool) -> Self {
        let assets_dir = settings.storage.assets_dir.clone();
        Self {
            settings,
            pool,
            assets_dir,
        }
    }

    /// Context with an explicit assets directory, overriding the configured one.
    pub fn with_assets_dir(settings: Settings, pool: SqlitePool, assets_dir: PathBuf) -> Self {
        Self {
            settings,
            pool,
            assets_dir,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }
}
