//! Guardian Risk Scoring
//!
//! Turns per-category span counts and the topical context of a text into a
//! 0-100 risk score with an itemized list of contributing factors:
//! - PII density (spans per thousand characters)
//! - Category sensitivity (weighted span counts)
//! - Topical context (keyword topics present in the text)

pub mod config;
pub mod scorer;

pub use config::{ContextTopic, RiskConfig};
pub use scorer::{RiskFactor, RiskLevel, RiskScore, RiskScorer};
