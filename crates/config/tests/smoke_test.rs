//! Comprehensive smoke test

use listarr_config::{
    Config, ConfigLoader, ConfigStore, ErrorKind, QualityPreset, DEFAULT_CONFIG_FILE,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn smoke_test_complete_workflow() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let config_dir = temp_dir.path().join("config");

    println!("\n=== CONFIG SYSTEM SMOKE TEST ===\n");

    println!("1. Creating ConfigStore...");
    let store = ConfigStore::with_directory(&config_dir);
    assert!(!store.config_path().exists());
    assert!(!store.is_initialized());
    println!("   ✓ Store created");

    println!("2. Initializing config...");
    let created = store.initialize()?;
    assert!(created);
    assert!(store.config_path().exists());
    println!("   ✓ Config file created");

    println!("3. Reading default config...");
    assert_eq!(store.get()?, Config::default());
    println!("   ✓ Default config loaded");

    println!("4. Validating file out of band...");
    let loader = ConfigLoader::new(&config_dir, DEFAULT_CONFIG_FILE);
    loader.validate()?;
    println!("   ✓ Config is valid");

    println!("5. Updating config...");
    let mut config = store.get()?;
    config.downloads.enabled = true;
    config.downloads.client_url = "http://localhost:8686".to_string();
    config.downloads.api_key = "lidarr-key".to_string();
    config.downloads.quality_preset = QualityPreset::Lossless;
    store.update(config)?;
    println!("   ✓ Config updated and saved");

    println!("6. Reloading and verifying changes...");
    let reloaded = loader.load()?;
    assert!(reloaded.downloads.enabled);
    assert_eq!(reloaded.downloads.quality_preset, QualityPreset::Lossless);
    assert_eq!(reloaded, store.get()?);
    println!("   ✓ Changes persisted");

    println!("7. Corrupting the file...");
    fs::write(store.config_path(), "}{")?;
    assert_eq!(loader.validate().unwrap_err().kind(), ErrorKind::Format);
    println!("   ✓ Corruption detected");

    println!("8. Repairing...");
    loader.repair(&Config::default())?;
    loader.validate()?;
    let backups = loader.backup_manager().list_backups()?;
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0].path)?, "}{");
    println!("   ✓ Repaired, corrupt copy kept at {}", backups[0].filename);

    println!("9. Resetting through the store...");
    store.reset()?;
    assert_eq!(store.get()?, Config::default());
    assert_eq!(loader.load()?, Config::default());
    println!("   ✓ Reset complete");

    println!("\n=== ALL SMOKE TESTS PASSED ===\n");

    Ok(())
}
