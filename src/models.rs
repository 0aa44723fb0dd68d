// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::catalog::Category;
use crate::analysis::color::ColorProfile;
use crate::analysis::content::ContentAnalysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
    Tiff,
    Other,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Other => "other",
        }
    }

    pub fn is_lossless(&self) -> bool {
        matches!(self, ImageFormat::Png)
    }

    pub fn is_lossy(&self) -> bool {
        matches!(self, ImageFormat::Jpeg)
    }
}

/// Header-level facts about an image, as reported by a statistics provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub channels: u8,
    pub has_alpha: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStat {
    pub mean: f64,
    pub stdev: f64,
}

impl ChannelStat {
    pub fn new(mean: f64, stdev: f64) -> Self {
        Self { mean, stdev }
    }
}

/// Per-channel statistics in channel order (R, G, B, then alpha when present).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub channels: Vec<ChannelStat>,
}

impl ChannelStats {
    pub fn new(channels: Vec<ChannelStat>) -> Self {
        Self { channels }
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Usable statistics: at least one channel and no NaN or infinite values.
    pub fn is_valid(&self) -> bool {
        !self.channels.is_empty()
            && self
                .channels
                .iter()
                .all(|c| c.mean.is_finite() && c.stdev.is_finite())
    }

    pub fn first(&self) -> Option<&ChannelStat> {
        self.channels.first()
    }

    /// The three leading channels, when the image has color information.
    pub fn rgb(&self) -> Option<(ChannelStat, ChannelStat, ChannelStat)> {
        match self.channels.as_slice() {
            [r, g, b, ..] => Some((*r, *g, *b)),
            _ => None,
        }
    }

    pub fn mean_of_means(&self) -> Option<f64> {
        average(self.channels.iter().map(|c| c.mean))
    }

    pub fn mean_stdev(&self) -> Option<f64> {
        average(self.channels.iter().map(|c| c.stdev))
    }

    /// Mean of the squared per-channel standard deviations.
    pub fn variance(&self) -> Option<f64> {
        average(self.channels.iter().map(|c| c.stdev * c.stdev))
    }
}

fn average(values: impl ExactSizeIterator<Item = f64>) -> Option<f64> {
    let len = values.len();
    if len == 0 {
        return None;
    }
    Some(values.sum::<f64>() / len as f64)
}

/// Metadata plus full-resolution channel statistics for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMetrics {
    pub metadata: ImageMetadata,
    pub stats: ChannelStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub filename: String,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub size: usize,
    pub channels: u8,
    pub has_alpha: bool,
    pub aspect_ratio: f64,
    pub megapixels: f64,
}

impl BasicInfo {
    pub fn from_metadata(filename: &str, size: usize, metadata: &ImageMetadata) -> Self {
        let aspect_ratio = if metadata.height == 0 {
            0.0
        } else {
            metadata.width as f64 / metadata.height as f64
        };
        let pixels = metadata.width as f64 * metadata.height as f64;
        let megapixels = (pixels / 1_000_000.0 * 100.0).round() / 100.0;

        Self {
            filename: filename.to_string(),
            format: metadata.format,
            width: metadata.width,
            height: metadata.height,
            size,
            channels: metadata.channels,
            has_alpha: metadata.has_alpha,
            aspect_ratio,
            megapixels,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Advanced,
    Traditional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionCandidate {
    pub category: Category,
    pub score: f64,
    pub matched_features: Vec<String>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSummary {
    pub max: f64,
    pub average: f64,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Statistics over the candidates kept from the advanced pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedSummary {
    pub total_detections: usize,
    pub max_confidence: f64,
    pub avg_confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub candidates: Vec<DetectionCandidate>,
    pub primary: Option<Category>,
    pub primary_objects: Vec<Category>,
    pub summary: ConfidenceSummary,
    pub advanced: Option<AdvancedSummary>,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn advanced_candidates(&self) -> impl Iterator<Item = &DetectionCandidate> {
        self.candidates
            .iter()
            .filter(|c| c.provenance == Provenance::Advanced)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub basic_info: Option<BasicInfo>,
    pub color_info: ColorProfile,
    pub content_analysis: Option<ContentAnalysis>,
    pub object_detection: DetectionResult,
    pub description: String,
    pub tags: Vec<String>,
    pub analysis_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisReport {
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub name: String,
    pub report: AnalysisReport,
}
