//! Property-based tests for configuration system

use listarr_config::{
    Config, ConfigPersistence, ConfigStore, ConflictStrategy, Environment, ErrorKind, FileFormat,
    LogLevel, QualityPreset,
};
use std::fs;
use tempfile::TempDir;

fn non_default_config() -> Config {
    let mut config = Config::default();
    config.app.environment = Environment::Production;
    config.app.max_page_size = 500;
    config.app.enable_caching = false;
    config.database.password = "p@ss wörd".to_string();
    config.server.tls_enabled = true;
    config.server.tls_cert_file = "/etc/ssl/listarr.crt".to_string();
    config.server.tls_key_file = "/etc/ssl/listarr.key".to_string();
    config.server.trusted_proxies = vec!["10.0.0.0/8".to_string()];
    config.auth.allowed_origins = vec![];
    config.integrations.jellyfin.enabled = true;
    config.integrations.jellyfin.server_url = "http://jellyfin:8096".to_string();
    config.integrations.jellyfin.api_key = "key".to_string();
    config.integrations.jellyfin.user_id = "user".to_string();
    config.sync.collections.conflict_strategy = ConflictStrategy::Manual;
    config.downloads.file_format = FileFormat::Opus;
    config.downloads.quality_preset = QualityPreset::Lossless;
    config
}

#[test]
fn property_serialization_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let config = non_default_config();
    let json = serde_json::to_string(&config)?;
    let deserialized: Config = serde_json::from_str(&json)?;
    assert_eq!(config, deserialized);
    Ok(())
}

#[test]
fn property_save_then_load_is_identity() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let persistence = ConfigPersistence::new(temp_dir.path().join("app.config.json"));

    for config in [Config::default(), non_default_config()] {
        assert!(config.validate().is_ok());
        persistence.write(&config)?;
        assert_eq!(persistence.read()?, config);
    }

    Ok(())
}

#[test]
fn property_default_always_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn property_reset_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let store = ConfigStore::with_directory(temp_dir.path());
    store.initialize()?;
    store.update(non_default_config())?;

    store.reset()?;
    let first = fs::read_to_string(store.config_path())?;
    store.reset()?;
    let second = fs::read_to_string(store.config_path())?;

    assert_eq!(first, second);
    assert_eq!(serde_json::from_str::<Config>(&first)?, Config::default());
    assert_eq!(store.get()?, Config::default());
    Ok(())
}

#[test]
fn property_initialize_never_rewrites_existing_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let store = ConfigStore::with_directory(temp_dir.path());
    store.initialize()?;
    store.update(non_default_config())?;
    let before = fs::read(store.config_path())?;

    for _ in 0..3 {
        let fresh = ConfigStore::with_directory(temp_dir.path());
        assert!(!fresh.initialize()?);
        assert_eq!(fs::read(fresh.config_path())?, before);
        assert_eq!(fresh.get()?, non_default_config());
    }

    Ok(())
}

#[test]
fn property_initialize_without_file_writes_default() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let store = ConfigStore::with_directory(temp_dir.path().join("nested").join("config"));

    assert!(store.initialize()?);

    let written: Config = serde_json::from_str(&fs::read_to_string(store.config_path())?)?;
    assert_eq!(written, Config::default());
    Ok(())
}

#[test]
fn property_page_size_bounds() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let store = ConfigStore::with_directory(temp_dir.path());
    store.initialize()?;

    for rejected in [0u32, 1001, 5000] {
        let mut config = Config::default();
        config.app.max_page_size = rejected;
        let err = store.update(config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Constraint);
        assert_eq!(err.validation_errors()[0].field, "app.maxPageSize");
    }

    for accepted in [1u32, 2, 100, 999, 1000] {
        let mut config = Config::default();
        config.app.max_page_size = accepted;
        store.update(config)?;
        assert_eq!(store.get()?.app.max_page_size, accepted);
    }

    Ok(())
}

#[test]
fn property_validation_deterministic() {
    let mut config = Config::default();
    config.app.max_page_size = 0;
    config.integrations.spotify.enabled = true;

    let result1 = config.validate();
    let result2 = config.validate();

    assert_eq!(result1, result2);
}

#[test]
fn property_fallback_variants_never_validate() {
    let mut cases: Vec<(&str, Config)> = Vec::new();

    for literal in LogLevel::VARIANTS {
        let mut config = Config::default();
        config.app.log_level = LogLevel::Unrecognized(literal.to_string());
        cases.push(("app.logLevel", config));
    }
    for literal in Environment::VARIANTS {
        let mut config = Config::default();
        config.app.environment = Environment::Unrecognized(literal.to_string());
        cases.push(("app.environment", config));
    }
    for literal in ConflictStrategy::VARIANTS {
        let mut config = Config::default();
        config.sync.collections.conflict_strategy =
            ConflictStrategy::Unrecognized(literal.to_string());
        cases.push(("sync.collections.conflictStrategy", config));
    }
    for literal in FileFormat::VARIANTS {
        let mut config = Config::default();
        config.downloads.file_format = FileFormat::Unrecognized(literal.to_string());
        cases.push(("downloads.fileFormat", config));
    }
    for literal in QualityPreset::VARIANTS {
        let mut config = Config::default();
        config.downloads.quality_preset = QualityPreset::Unrecognized(literal.to_string());
        cases.push(("downloads.qualityPreset", config));
    }

    for (field, config) in cases {
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, field);
    }
}

#[test]
fn property_validated_document_survives_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let store = ConfigStore::with_directory(temp_dir.path());
    store.initialize()?;

    let mut config = non_default_config();
    config.app.log_level = LogLevel::Unrecognized("info".to_string());
    assert!(store.update(config).is_err());

    let accepted = store.update(non_default_config())?;
    let reread = ConfigPersistence::new(store.config_path().to_path_buf()).read()?;
    assert_eq!(reread, accepted);
    Ok(())
}
