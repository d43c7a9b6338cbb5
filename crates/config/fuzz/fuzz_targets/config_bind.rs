//! Fuzzing harness for request-body binding
//!
//! Arbitrary bytes must never cause a panic, only a `BadInput` or
//! `Validation` error.
//! Run with: cargo fuzz run config_bind

#![no_main]
use libfuzzer_sys::fuzz_target;
use listarr_config::Config;

fuzz_target!(|data: &[u8]| {
    let _ = Config::bind(data);
});
