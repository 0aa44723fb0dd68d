// src/analysis/features.rs
use serde::{Deserialize, Serialize};

use crate::models::{ChannelStats, ImageMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureType {
    Uniform,
    Organic,
    Complex,
    #[default]
    Unknown,
}

impl TextureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureType::Uniform => "uniform",
            TextureType::Organic => "organic",
            TextureType::Complex => "complex",
            TextureType::Unknown => "unknown",
        }
    }
}

/// Structural and textural descriptors used by the template predicates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    pub has_high_frequency: bool,
    pub has_vertical_structures: bool,
    pub has_horizontal_structures: bool,
    pub has_circular_shapes: bool,
    pub has_organic_shapes: bool,
    pub edge_complexity: f64,
    pub color_variation: f64,
    pub symmetry: f64,
    pub texture_type: TextureType,
}

pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Derive the feature vector. Missing or unusable statistics yield the
    /// all-false / zero / unknown vector.
    pub fn extract(metrics: Option<&ImageMetrics>) -> FeatureVector {
        let Some(metrics) = metrics.filter(|m| m.stats.is_valid()) else {
            return FeatureVector::default();
        };
        let stats = &metrics.stats;
        let (width, height) = (
            metrics.metadata.width as f64,
            metrics.metadata.height as f64,
        );
        let mean_stdev = stats.mean_stdev().unwrap_or(0.0);
        let color_variation = Self::color_variation(stats);

        FeatureVector {
            has_high_frequency: mean_stdev > 50.0,
            has_vertical_structures: height > width * 1.2,
            has_horizontal_structures: width > height * 1.2,
            has_circular_shapes: stats.channels.len() >= 3,
            has_organic_shapes: color_variation > 0.3,
            edge_complexity: (mean_stdev / 100.0).clamp(0.0, 1.0),
            color_variation,
            symmetry: Self::symmetry(width, height),
            texture_type: Self::texture_type(mean_stdev),
        }
    }

    /// Population variance of the channel means, scaled into [0, 1].
    pub fn color_variation(stats: &ChannelStats) -> f64 {
        if stats.channels.len() < 3 {
            return 0.0;
        }
        let Some(avg) = stats.mean_of_means() else {
            return 0.0;
        };
        let variance = stats
            .channels
            .iter()
            .map(|c| (c.mean - avg).powi(2))
            .sum::<f64>()
            / stats.channels.len() as f64;
        (variance / 10_000.0).clamp(0.0, 1.0)
    }

    /// Coarse square-aspect heuristic.
    pub fn symmetry(width: f64, height: f64) -> f64 {
        if height > 0.0 && (width / height - 1.0).abs() < 0.1 {
            0.8
        } else {
            0.3
        }
    }

    pub fn texture_type(mean_stdev: f64) -> TextureType {
        if mean_stdev < 20.0 {
            TextureType::Uniform
        } else if mean_stdev > 60.0 {
            TextureType::Complex
        } else {
            TextureType::Organic
        }
    }
}

/// Gradient and second-derivative filter responses on the greyscale image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureSummary {
    pub sobel_response: f64,
    pub laplacian_response: f64,
    pub texture_energy: f64,
    pub directional_variance: f64,
}

impl TextureSummary {
    pub fn from_responses(sobel: &ChannelStats, laplacian: &ChannelStats) -> Option<Self> {
        let sobel = sobel.first().filter(|c| c.mean.is_finite() && c.stdev.is_finite())?;
        let laplacian = laplacian
            .first()
            .filter(|c| c.mean.is_finite() && c.stdev.is_finite())?;

        Some(Self {
            sobel_response: sobel.mean,
            laplacian_response: laplacian.mean,
            texture_energy: (sobel.stdev.powi(2) + laplacian.stdev.powi(2)).sqrt(),
            directional_variance: sobel.stdev,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    Strong,
    Medium,
    Weak,
}

/// High-pass filter response summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSummary {
    pub edge_strength: f64,
    pub edge_density: f64,
    pub edge_direction: EdgeDirection,
}

impl EdgeSummary {
    pub fn from_response(edges: &ChannelStats) -> Option<Self> {
        let channel = edges
            .first()
            .filter(|c| c.mean.is_finite() && c.stdev.is_finite())?;
        let edge_direction = if channel.mean > 100.0 {
            EdgeDirection::Strong
        } else if channel.mean > 50.0 {
            EdgeDirection::Medium
        } else {
            EdgeDirection::Weak
        };

        Some(Self {
            edge_strength: channel.mean,
            edge_density: channel.stdev / 255.0,
            edge_direction,
        })
    }
}
