//! Quad-pack battery load analyzer.
//!
//! Measures the unloaded and loaded cell voltages of a 4-cell battery
//! pack under a carbon-pile load, grades each cell's health, and keeps
//! 13 historical test records in non-volatile storage. The operator
//! drives everything through four pushbuttons and a 4×20 character LCD.
//!
//! This `lib.rs` holds all the pure logic - the hierarchical menu state
//! machine, cursor/slot arithmetic, record codec, health grading, and
//! screen rendering - and is testable on the host (`cargo test`).
//! Hardware bindings (SAADC, LCD, fan, buzzer, flash) sit behind the
//! `embedded` feature; the embedded binary lives in `main.rs`.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod grading;
pub mod history;
pub mod interface;
pub mod measure;
pub mod record;
pub mod settings;

#[cfg(feature = "embedded")]
pub mod hw;
