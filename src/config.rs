use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub assets: AssetConfig,
    /// Title rendered in the page header and `<title>`.
    pub site_title: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: String,
    /// File name of the document store inside `data_dir`
    pub db_file: String,
    /// JSON dump imported into the store on startup
    pub seed_file: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AssetConfig {
    pub static_dir: String,
    /// Compile the stylesheet on startup
    pub build_on_start: bool,
    /// Abort startup when the stylesheet build fails
    pub build_required: bool,
    pub tailwind_bin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            db_file: "catalog.redb".to_string(),
            seed_file: None,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            static_dir: "./static".to_string(),
            build_on_start: true,
            build_required: false,
            tailwind_bin: "tailwindcss".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            assets: AssetConfig::default(),
            site_title: "Music Binder".to_string(),
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or(defaults.server.bind_address);

        let data_dir = std::env::var("DATA_DIR").unwrap_or(defaults.store.data_dir);
        let db_file = std::env::var("DB_FILE").unwrap_or(defaults.store.db_file);
        let seed_file = std::env::var("SEED_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let static_dir = std::env::var("STATIC_DIR").unwrap_or(defaults.assets.static_dir);
        let tailwind_bin = std::env::var("TAILWIND_BIN").unwrap_or(defaults.assets.tailwind_bin);

        let site_title = std::env::var("SITE_TITLE").unwrap_or(defaults.site_title);

        let config = Config {
            server: ServerConfig { bind_address },
            store: StoreConfig {
                data_dir,
                db_file,
                seed_file,
            },
            assets: AssetConfig {
                static_dir,
                build_on_start: env_flag("ASSET_BUILD", true),
                build_required: env_flag("ASSET_BUILD_REQUIRED", false),
                tailwind_bin,
            },
            site_title,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "BIND_ADDRESS cannot be empty".to_string(),
            ));
        }

        let db_file = Path::new(&self.store.db_file);
        if self.store.db_file.is_empty() || db_file.components().count() != 1 {
            return Err(ConfigError::ValidationError(format!(
                "DB_FILE must be a bare file name, got '{}'",
                self.store.db_file
            )));
        }

        if self.assets.build_required && !self.assets.build_on_start {
            tracing::warn!(
                "ASSET_BUILD_REQUIRED is set but ASSET_BUILD is disabled; the stylesheet will not be built"
            );
        }

        Ok(())
    }

    /// Full path of the document store file.
    pub fn db_path(&self) -> PathBuf {
        Path::new(&self.store.data_dir).join(&self.store.db_file)
    }
}
