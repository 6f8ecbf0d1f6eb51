//! Guardian Content Flagging
//!
//! Keyword-based flagging of sensitive themes and prompt-safety concerns
//! (dangerous requests, adversarial prompting, jailbreak phrasing). Runs on
//! the raw text and shares nothing with span detection.

pub mod config;
pub mod flagger;

pub use config::{FlaggerConfig, KeywordCategory};
pub use flagger::{ContentFlagger, Flag, FlaggingResult};
