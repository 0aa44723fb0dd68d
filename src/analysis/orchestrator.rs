// src/analysis/orchestrator.rs
//! Per-image sequencing of the engine, and the entry points callers use.

use std::sync::Arc;

use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::advanced::AdvancedFeatures;
use crate::analysis::aggregator::DetectionAggregator;
use crate::analysis::catalog::CATALOG;
use crate::analysis::color::{ColorHistogram, ColorProfile, ColorProfiler};
use crate::analysis::content::ContentAnalyzer;
use crate::analysis::description::DescriptionComposer;
use crate::analysis::features::{EdgeSummary, FeatureExtractor, TextureSummary};
use crate::analysis::multiscale::MultiScaleAnalyzer;
use crate::analysis::predicates::FeatureContext;
use crate::analysis::tags;
use crate::config::AnalyzerConfig;
use crate::models::{
    AnalysisReport, BasicInfo, BatchEntry, ChannelStats, DetectionCandidate, DetectionResult,
    ImageMetadata, ImageMetrics,
};
use crate::provider::{ImageSource, Kernel, ProviderError, StatisticsProvider, TimeoutProvider};

pub const DEGRADED_DESCRIPTION: &str = "Unable to analyze this image.";
pub const DEGRADED_TAG: &str = "analysis-failed";

/// Stateless analyzer, built once per process and shared.
pub struct ImageAnalyzer {
    provider: TimeoutProvider,
    multi_scale: MultiScaleAnalyzer,
    batch_concurrency: usize,
}

impl ImageAnalyzer {
    pub fn new(provider: Arc<dyn StatisticsProvider>, config: &AnalyzerConfig) -> Self {
        Self {
            provider: TimeoutProvider::new(provider, config.provider_timeout),
            multi_scale: MultiScaleAnalyzer::new(config.scales.clone()),
            batch_concurrency: config.batch_concurrency.max(1),
        }
    }

    /// Analyze one image. Never fails: provider errors degrade the report.
    pub async fn analyze(&self, image: &ImageSource) -> AnalysisReport {
        let metadata = match self.provider.metadata(image).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Metadata unavailable for {}: {}", image.name, e);
                return Self::degraded(&e);
            }
        };

        let basic = BasicInfo::from_metadata(&image.name, image.size(), &metadata);
        let stats = self.base_stats(image).await;
        let color = ColorProfiler::profile(stats.as_ref());
        let features = FeatureExtractor::extract(
            stats
                .as_ref()
                .map(|stats| ImageMetrics {
                    metadata: metadata.clone(),
                    stats: stats.clone(),
                })
                .as_ref(),
        );
        let content = ContentAnalyzer::analyze(&basic, &color);

        // Without pixel statistics neither pass has evidence to score.
        let (advanced, traditional) = match &stats {
            Some(stats) => {
                let ctx = FeatureContext::new(&basic, &color, &features);
                let traditional = DetectionAggregator::traditional_pass(&ctx, &CATALOG);
                let advanced = self.advanced_pass(image, &metadata, stats).await;
                (Some(advanced), Some(traditional))
            }
            None => (None, None),
        };
        let detection = DetectionAggregator::merge(advanced, traditional);

        let description = DescriptionComposer::compose(Some(&content), &detection);
        let tags = tags::generate(Some(&basic), &color, Some(&content), &detection);

        debug!(
            "Analyzed {}: {} candidates, primary {:?}",
            image.name,
            detection.candidates.len(),
            detection.primary.map(|c| c.as_str())
        );

        AnalysisReport {
            id: Uuid::new_v4(),
            basic_info: Some(basic),
            color_info: color,
            content_analysis: Some(content),
            object_detection: detection,
            description,
            tags,
            analysis_time: Utc::now(),
            error: None,
        }
    }

    /// Analyze every image, a bounded number at a time. The output order
    /// matches the input order and one bad image never stops the batch.
    pub async fn analyze_batch(&self, images: &[ImageSource]) -> Vec<BatchEntry> {
        let entries: Vec<BatchEntry> = stream::iter(images.iter().map(|image| async move {
            BatchEntry {
                name: image.name.clone(),
                report: self.analyze(image).await,
            }
        }))
        .buffered(self.batch_concurrency)
        .collect()
        .await;

        let degraded = entries.iter().filter(|e| e.report.is_degraded()).count();
        info!(
            "Batch of {} images analyzed ({} degraded)",
            entries.len(),
            degraded
        );
        entries
    }

    async fn base_stats(&self, image: &ImageSource) -> Option<ChannelStats> {
        match self.provider.stats(image, None).await {
            Ok(stats) if stats.is_valid() => Some(stats),
            Ok(_) => {
                warn!("Statistics for {} were empty or not finite", image.name);
                None
            }
            Err(e) => {
                warn!("Statistics unavailable for {}: {}", image.name, e);
                None
            }
        }
    }

    async fn convolve(&self, image: &ImageSource, kernel: &Kernel) -> Option<ChannelStats> {
        match self.provider.convolution_stats(image, kernel).await {
            Ok(stats) if stats.is_valid() => Some(stats),
            Ok(_) => None,
            Err(e) => {
                warn!(
                    "{} convolution unavailable for {}: {}",
                    kernel.name, image.name, e
                );
                None
            }
        }
    }

    async fn advanced_pass(
        &self,
        image: &ImageSource,
        metadata: &ImageMetadata,
        stats: &ChannelStats,
    ) -> Vec<DetectionCandidate> {
        let (sobel, laplacian, high_pass, multi_scale) = tokio::join!(
            self.convolve(image, &Kernel::SOBEL),
            self.convolve(image, &Kernel::LAPLACIAN),
            self.convolve(image, &Kernel::HIGH_PASS),
            self.multi_scale.analyze(&self.provider, image),
        );

        let features = AdvancedFeatures {
            color: ColorHistogram::from_stats(stats),
            texture: sobel
                .zip(laplacian)
                .and_then(|(s, l)| TextureSummary::from_responses(&s, &l)),
            edges: high_pass.and_then(|e| EdgeSummary::from_response(&e)),
            multi_scale,
            ..AdvancedFeatures::new(metadata)
        };
        DetectionAggregator::advanced_pass(&features)
    }

    fn degraded(error: &ProviderError) -> AnalysisReport {
        warn!("Returning degraded report: {}", error);
        AnalysisReport {
            id: Uuid::new_v4(),
            basic_info: None,
            color_info: ColorProfile::default(),
            content_analysis: None,
            object_detection: DetectionResult::default(),
            description: DEGRADED_DESCRIPTION.to_string(),
            tags: vec![DEGRADED_TAG.to_string()],
            analysis_time: Utc::now(),
            error: Some(format!("Analysis failed: {}", error)),
        }
    }
}
