use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pictoscope::models::{ChannelStat, ChannelStats, ImageFormat, ImageMetadata};
use pictoscope::provider::{ImageSource, Kernel, ProviderError, ResizeSpec, StatisticsProvider};

/// Canned provider answers for one image name.
#[derive(Clone)]
pub struct Script {
    pub metadata: Result<ImageMetadata, ProviderError>,
    pub stats: Result<ChannelStats, ProviderError>,
    /// Keyed by kernel name; a missing kernel is a decode failure.
    pub convolutions: HashMap<&'static str, Result<ChannelStats, ProviderError>>,
    /// Keyed by resize target. When empty, resized requests get the
    /// full-size statistics; otherwise an unlisted size fails.
    pub scaled: HashMap<u32, ChannelStats>,
    /// Applied before every answer.
    pub delay: Duration,
}

impl Script {
    pub fn jpeg(width: u32, height: u32, channels: &[(f64, f64)]) -> Self {
        Self {
            metadata: Ok(ImageMetadata {
                width,
                height,
                format: ImageFormat::Jpeg,
                channels: channels.len() as u8,
                has_alpha: false,
            }),
            stats: Ok(stats(channels)),
            convolutions: HashMap::new(),
            scaled: HashMap::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn broken() -> Self {
        Self {
            metadata: Err(ProviderError::UnsupportedFormat),
            stats: Err(ProviderError::UnsupportedFormat),
            convolutions: HashMap::new(),
            scaled: HashMap::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_convolution(mut self, kernel: &Kernel, mean: f64, stdev: f64) -> Self {
        self.convolutions
            .insert(kernel.name, Ok(stats(&[(mean, stdev)])));
        self
    }

    pub fn with_scale(mut self, size: u32, channels: &[(f64, f64)]) -> Self {
        self.scaled.insert(size, stats(channels));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub fn stats(channels: &[(f64, f64)]) -> ChannelStats {
    ChannelStats::new(
        channels
            .iter()
            .map(|&(mean, stdev)| ChannelStat::new(mean, stdev))
            .collect(),
    )
}

/// Answers by image name.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: HashMap<String, Script>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, script: Script) -> Self {
        self.scripts.insert(name.to_string(), script);
        self
    }

    pub fn shared(self) -> Arc<dyn StatisticsProvider> {
        Arc::new(self)
    }

    async fn script(&self, image: &ImageSource) -> Result<&Script, ProviderError> {
        let script = self
            .scripts
            .get(&image.name)
            .ok_or_else(|| ProviderError::Decode(format!("no script for {}", image.name)))?;
        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }
        Ok(script)
    }
}

#[async_trait]
impl StatisticsProvider for ScriptedProvider {
    async fn metadata(&self, image: &ImageSource) -> Result<ImageMetadata, ProviderError> {
        self.script(image).await?.metadata.clone()
    }

    async fn stats(
        &self,
        image: &ImageSource,
        resize: Option<ResizeSpec>,
    ) -> Result<ChannelStats, ProviderError> {
        let script = self.script(image).await?;
        match resize {
            Some(spec) if !script.scaled.is_empty() => {
                script.scaled.get(&spec.size).cloned().ok_or_else(|| {
                    ProviderError::Decode(format!("no {}px rendition", spec.size))
                })
            }
            _ => script.stats.clone(),
        }
    }

    async fn convolution_stats(
        &self,
        image: &ImageSource,
        kernel: &Kernel,
    ) -> Result<ChannelStats, ProviderError> {
        self.script(image)
            .await?
            .convolutions
            .get(kernel.name)
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::Decode(format!("no {} response", kernel.name))))
    }
}

pub fn source(name: &str) -> ImageSource {
    ImageSource::new(name, vec![0u8; 32])
}
