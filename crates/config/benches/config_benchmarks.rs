//! Benchmarks for configuration system
//!
//! Run with: cargo bench --package listarr-config

use criterion::{criterion_group, criterion_main, Criterion};
use listarr_config::{Config, ConfigLoader, ConfigStore, DEFAULT_CONFIG_FILE};
use std::hint::black_box;
use tempfile::TempDir;

fn setup_test_store() -> (TempDir, ConfigStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = ConfigStore::with_directory(temp_dir.path().join("config"));
    store.initialize().expect("Failed to initialize");
    (temp_dir, store)
}

fn bench_config_creation(c: &mut Criterion) {
    c.bench_function("config_default", |b| {
        b.iter(|| {
            let config = Config::default();
            black_box(config);
        });
    });
}

fn bench_config_validation(c: &mut Criterion) {
    let config = Config::default();

    c.bench_function("config_validate", |b| {
        b.iter(|| {
            let result = config.validate();
            black_box(result);
        });
    });
}

fn bench_config_serialization(c: &mut Criterion) {
    let config = Config::default();

    c.bench_function("config_serialize_json", |b| {
        b.iter(|| {
            let json = serde_json::to_string_pretty(&config).expect("Failed to serialize");
            black_box(json);
        });
    });
}

fn bench_config_deserialization(c: &mut Criterion) {
    let json = serde_json::to_string_pretty(&Config::default()).expect("Failed to serialize");

    c.bench_function("config_deserialize_json", |b| {
        b.iter(|| {
            let config: Config = serde_json::from_str(&json).expect("Failed to deserialize");
            black_box(config);
        });
    });
}

fn bench_config_bind(c: &mut Criterion) {
    let body = serde_json::to_vec(&Config::default()).expect("Failed to serialize");

    c.bench_function("config_bind", |b| {
        b.iter(|| {
            let config = Config::bind(black_box(&body)).expect("Failed to bind");
            black_box(config);
        });
    });
}

fn bench_store_get(c: &mut Criterion) {
    let (_temp_dir, store) = setup_test_store();

    c.bench_function("store_get", |b| {
        b.iter(|| {
            let config = store.get().expect("Failed to get");
            black_box(config);
        });
    });
}

fn bench_store_update(c: &mut Criterion) {
    let (_temp_dir, store) = setup_test_store();
    let mut config = Config::default();
    config.app.max_page_size = 250;

    c.bench_function("store_update", |b| {
        b.iter(|| {
            store.update(config.clone()).expect("Failed to update");
        });
    });
}

fn bench_store_reset(c: &mut Criterion) {
    let (_temp_dir, store) = setup_test_store();

    c.bench_function("store_reset", |b| {
        b.iter(|| {
            store.reset().expect("Failed to reset");
        });
    });
}

fn bench_loader_validate(c: &mut Criterion) {
    let (_temp_dir, store) = setup_test_store();
    let loader = ConfigLoader::new(store.config_dir(), DEFAULT_CONFIG_FILE);

    c.bench_function("loader_validate", |b| {
        b.iter(|| {
            loader.validate().expect("Failed to validate");
        });
    });
}

criterion_group!(
    benches,
    bench_config_creation,
    bench_config_validation,
    bench_config_serialization,
    bench_config_deserialization,
    bench_config_bind,
    bench_store_get,
    bench_store_update,
    bench_store_reset,
    bench_loader_validate
);

criterion_main!(benches);
