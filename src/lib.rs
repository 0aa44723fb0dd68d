// src/lib.rs
pub mod analysis;
pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod services;

pub use analysis::ImageAnalyzer;
pub use config::{AnalyzerConfig, Config};
pub use errors::PictoscopeError;
pub use provider::{ImageSource, ProviderError, StatisticsProvider};
