// FILE: crates/cli/src/commands.rs

use anyhow::{bail, Context, Result};
use console::style;
use listarr_config::{Config, ConfigLoader, ConfigStore, ErrorKind};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Log filter to start with when `RUST_LOG` is not set
///
/// Follows `app.logLevel` of the on-disk file, or `info` if it can't be read.
pub fn default_log_filter(config_dir: &str, config_file: &str) -> String {
    ConfigLoader::new(config_dir, config_file)
        .load()
        .map(|config| config.app.log_level.as_filter())
        .unwrap_or(log::LevelFilter::Info)
        .to_string()
        .to_lowercase()
}

/// Load the configuration and serve the HTTP API
pub async fn serve(config_dir: &str, config_file: &str, addr: Option<&str>) -> Result<()> {
    let store = ConfigStore::new(config_dir, config_file);
    store
        .initialize()
        .with_context(|| format!("Failed to load config from {}", store.config_path().display()))?;

    let config = store.get().context("Failed to read loaded config")?;
    let addr = listen_address(&config, addr)?;

    let mut database = config.database.clone();
    database.apply_env_overrides();
    log::info!(
        "Database target: {}@{}:{}/{}",
        database.user,
        database.host,
        database.port,
        database.name
    );

    if config.auth.uses_default_secret() {
        log::warn!("auth.secret is still the default value; set a real secret before exposing the API");
    }

    if config.sync.enabled {
        log::info!(
            "Sync every {} min (playlists: {}, collections: {})",
            config.sync.interval_minutes,
            on_off(config.sync.category_active(&config.sync.playlists)),
            on_off(config.sync.category_active(&config.sync.collections))
        );
    } else {
        log::info!("Sync disabled");
    }

    let enabled = config.integrations.enabled_names();
    if !enabled.is_empty() {
        log::info!("Enabled integrations: {}", enabled.join(", "));
    }

    listarr_server::serve(Arc::new(store), addr)
        .await
        .with_context(|| format!("HTTP server on {} failed", addr))
}

/// Print the config file
pub fn show_config(config_dir: &str, config_file: &str) -> Result<()> {
    let loader = ConfigLoader::new(config_dir, config_file);
    let config = loader
        .load()
        .with_context(|| format!("Failed to load {}", loader.config_path().display()))?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Check the config file against every field rule
pub fn validate_config(config_dir: &str, config_file: &str) -> Result<()> {
    let loader = ConfigLoader::new(config_dir, config_file);

    match loader.validate() {
        Ok(()) => {
            println!(
                "{} {} is valid",
                style("✓").green().bold(),
                loader.config_path().display()
            );
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::Constraint => {
            println!(
                "{} {} has {} problem(s):",
                style("✗").red().bold(),
                loader.config_path().display(),
                e.validation_errors().len()
            );
            for error in e.validation_errors() {
                println!("  - {}", error);
            }
            bail!("Config validation failed");
        }
        Err(e) => Err(e).with_context(|| {
            format!("Failed to validate {}", loader.config_path().display())
        }),
    }
}

/// Replace an invalid config file with the defaults
///
/// Returns true if the file was rewritten.
pub fn repair_config(config_dir: &str, config_file: &str, force: bool) -> Result<bool> {
    let loader = ConfigLoader::new(config_dir, config_file);

    if !force {
        match loader.validate() {
            Ok(()) => {
                println!("Config is valid, nothing to repair. Use --force to overwrite anyway.");
                return Ok(false);
            }
            Err(e) => println!("{} {}", style("!").yellow().bold(), e),
        }
    }

    loader
        .repair(&Config::default())
        .with_context(|| format!("Failed to repair {}", loader.config_path().display()))?;

    println!(
        "{} Wrote default config to {}",
        style("✓").green().bold(),
        loader.config_path().display()
    );
    Ok(true)
}

/// Reset the config file to defaults
pub fn reset_config(config_dir: &str, config_file: &str) -> Result<()> {
    let store = ConfigStore::new(config_dir, config_file);

    // A corrupt file is the usual reason to reset, so a failed load is not fatal
    if let Err(e) = store.initialize() {
        log::warn!("Existing config could not be loaded: {}", e);
    }

    store.reset().context("Failed to reset config")?;

    println!(
        "{} Config reset to defaults at {}",
        style("✓").green().bold(),
        store.config_path().display()
    );
    Ok(())
}

/// List copies kept by previous repairs
pub fn list_backups(config_dir: &str, config_file: &str) -> Result<()> {
    let manager = ConfigLoader::new(config_dir, config_file).backup_manager();
    let backups = manager.list_backups().context("Failed to list backups")?;

    if backups.is_empty() {
        println!("No backups in {}", manager.backup_dir().display());
        return Ok(());
    }

    println!("\n{} Backups", style(backups.len()).bold().cyan());
    println!("{}", "=".repeat(60));

    for backup in backups {
        println!(
            "{}  {}  {}",
            backup.created_timestamp(),
            backup.size_human(),
            backup.filename
        );
    }

    Ok(())
}

/// Delete all but the `keep` newest backups
///
/// Returns the number of backups deleted.
pub fn prune_backups(config_dir: &str, config_file: &str, keep: usize) -> Result<usize> {
    let manager = ConfigLoader::new(config_dir, config_file)
        .backup_manager()
        .with_max_backups(keep);
    let deleted = manager.prune().context("Failed to prune backups")?;

    println!("Deleted {} backup(s), kept at most {}", deleted, keep);
    Ok(deleted)
}

/// Delete every backup
pub fn clear_backups(config_dir: &str, config_file: &str) -> Result<()> {
    let manager = ConfigLoader::new(config_dir, config_file).backup_manager();
    let deleted = manager
        .delete_all_backups()
        .context("Failed to delete backups")?;

    println!("Deleted {} backup(s)", deleted);
    Ok(())
}

/// Replace the config file with a backup
///
/// `backup` is either a bare file name inside the backup directory or a path.
pub fn restore_backup(config_dir: &str, config_file: &str, backup: &str) -> Result<()> {
    let loader = ConfigLoader::new(config_dir, config_file);
    let backup_path = resolve_backup(&loader, backup);

    loader
        .restore(&backup_path)
        .with_context(|| format!("Failed to restore {}", backup_path.display()))?;

    println!(
        "{} Restored {} from {}",
        style("✓").green().bold(),
        loader.config_path().display(),
        backup_path.display()
    );
    Ok(())
}

/// Print the database connection string, with DB_* overrides applied
pub fn print_dsn(config_dir: &str, config_file: &str) -> Result<()> {
    println!("{}", database_dsn(config_dir, config_file)?);
    Ok(())
}

fn database_dsn(config_dir: &str, config_file: &str) -> Result<String> {
    let loader = ConfigLoader::new(config_dir, config_file);
    let mut database = loader
        .load()
        .with_context(|| format!("Failed to load {}", loader.config_path().display()))?
        .database;
    database.apply_env_overrides();
    Ok(database.connection_url())
}

fn resolve_backup(loader: &ConfigLoader, backup: &str) -> PathBuf {
    let path = Path::new(backup);
    if path.components().count() == 1 {
        loader.backup_manager().backup_dir().join(path)
    } else {
        path.to_path_buf()
    }
}

fn on_off(active: bool) -> &'static str {
    if active {
        "on"
    } else {
        "off"
    }
}

fn listen_address(config: &Config, addr: Option<&str>) -> Result<SocketAddr> {
    let raw = match addr {
        Some(addr) => addr.to_string(),
        None => config.server.bind_address(),
    };

    raw.parse()
        .with_context(|| format!("Invalid listen address: {}", raw))
}
