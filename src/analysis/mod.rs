// src/analysis/mod.rs
//! The feature and scoring engine: statistics in, scored detections,
//! descriptions and tags out.
pub mod advanced;
pub mod aggregator;
pub mod catalog;
pub mod color;
pub mod content;
pub mod description;
pub mod features;
pub mod multiscale;
pub mod orchestrator;
pub mod predicates;
pub mod scoring;
pub mod tags;

pub use orchestrator::ImageAnalyzer;
