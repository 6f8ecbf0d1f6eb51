//! Guardian Engine
//!
//! Wires span detection, risk scoring, content flagging and span rewriting
//! into one configured engine, and loads that configuration from YAML or
//! TOML files with environment overrides.

pub mod config;
pub mod engine;

pub use config::{EngineConfig, LoggingConfig};
pub use engine::{Analysis, Engine};
