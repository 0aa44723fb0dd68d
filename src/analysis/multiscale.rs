// src/analysis/multiscale.rs
use futures_util::future::join_all;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::ChannelStats;
use crate::provider::{ImageSource, ResizeSpec, StatisticsProvider};

pub const DEFAULT_SCALES: [u32; 3] = [50, 100, 200];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleSample {
    pub scale: u32,
    pub variance: f64,
    /// log2(1 + variance), a cheap stand-in for histogram entropy.
    pub entropy: f64,
}

impl ScaleSample {
    pub fn from_stats(scale: u32, stats: &ChannelStats) -> Option<Self> {
        if !stats.is_valid() {
            return None;
        }
        let variance = stats.variance()?;
        Some(Self {
            scale,
            variance,
            entropy: (1.0 + variance).log2(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiScaleMetrics {
    pub samples: Vec<ScaleSample>,
    pub consistency: f64,
    pub texture_variation: f64,
}

impl MultiScaleMetrics {
    /// Both derived metrics stay at zero unless at least two scales resolved.
    pub fn from_samples(samples: Vec<ScaleSample>) -> Self {
        if samples.len() < 2 {
            return Self {
                samples,
                ..Self::default()
            };
        }

        let variances: Vec<f64> = samples.iter().map(|s| s.variance).collect();
        let mean = variances.iter().sum::<f64>() / variances.len() as f64;
        let consistency = if mean > 0.0 {
            let std_dev = (variances.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                / variances.len() as f64)
                .sqrt();
            (1.0 - std_dev / mean).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let max_entropy = samples.iter().map(|s| s.entropy).fold(f64::MIN, f64::max);
        let min_entropy = samples.iter().map(|s| s.entropy).fold(f64::MAX, f64::min);
        let texture_variation = if max_entropy > 0.0 {
            ((max_entropy - min_entropy) / max_entropy).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            samples,
            consistency,
            texture_variation,
        }
    }

    /// The sample taken at the largest scale that resolved.
    pub fn largest(&self) -> Option<&ScaleSample> {
        self.samples.iter().max_by_key(|s| s.scale)
    }

    pub fn resolved(&self) -> usize {
        self.samples.len()
    }
}

pub struct MultiScaleAnalyzer {
    scales: Vec<u32>,
}

impl MultiScaleAnalyzer {
    pub fn new(scales: Vec<u32>) -> Self {
        Self { scales }
    }

    /// Request statistics at every scale; scales that fail are skipped.
    pub async fn analyze(
        &self,
        provider: &dyn StatisticsProvider,
        image: &ImageSource,
    ) -> MultiScaleMetrics {
        let requests = self.scales.iter().map(|&scale| async move {
            match provider
                .stats(image, Some(ResizeSpec::fit_inside(scale)))
                .await
            {
                Ok(stats) => ScaleSample::from_stats(scale, &stats),
                Err(e) => {
                    warn!("Scale {} analysis failed for {}: {}", scale, image.name, e);
                    None
                }
            }
        });

        let samples = join_all(requests).await.into_iter().flatten().collect();
        MultiScaleMetrics::from_samples(samples)
    }
}

impl Default for MultiScaleAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_SCALES.to_vec())
    }
}
