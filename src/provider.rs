// src/provider.rs
//! The boundary between the analysis engine and whatever decodes images.
//!
//! The engine never touches pixels. It asks a [`StatisticsProvider`] for
//! metadata and per-channel statistics, and treats every failure as "no data".

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::models::{ChannelStats, ImageMetadata};

/// An image handed to the engine: a display name plus its encoded bytes.
#[derive(Debug, Clone)]
pub struct ImageSource {
    pub name: String,
    pub data: Bytes,
}

impl ImageSource {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Resample the image to fit inside a `size` x `size` box, keeping its aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    pub size: u32,
}

impl ResizeSpec {
    pub fn fit_inside(size: u32) -> Self {
        Self { size }
    }
}

/// A 3x3 convolution kernel applied to the greyscale image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    pub name: &'static str,
    pub weights: [f32; 9],
}

impl Kernel {
    /// Horizontal Sobel gradient.
    pub const SOBEL: Kernel = Kernel {
        name: "sobel",
        weights: [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
    };

    pub const LAPLACIAN: Kernel = Kernel {
        name: "laplacian",
        weights: [0.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 0.0],
    };

    /// Eight-neighbour high-pass edge operator.
    pub const HIGH_PASS: Kernel = Kernel {
        name: "high_pass",
        weights: [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
    };
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Image dimensions {width}x{height} exceed {max}x{max}")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("Provider call timed out after {0} ms")]
    Timeout(u64),

    #[error("Worker task failed: {0}")]
    Task(String),
}

#[async_trait]
pub trait StatisticsProvider: Send + Sync {
    async fn metadata(&self, image: &ImageSource) -> Result<ImageMetadata, ProviderError>;

    async fn stats(
        &self,
        image: &ImageSource,
        resize: Option<ResizeSpec>,
    ) -> Result<ChannelStats, ProviderError>;

    async fn convolution_stats(
        &self,
        image: &ImageSource,
        kernel: &Kernel,
    ) -> Result<ChannelStats, ProviderError>;
}

/// Wraps a provider so every call is bounded by `timeout`.
///
/// An elapsed deadline surfaces as [`ProviderError::Timeout`], the same as any
/// other provider failure.
pub struct TimeoutProvider {
    inner: Arc<dyn StatisticsProvider>,
    timeout: Duration,
}

impl TimeoutProvider {
    pub fn new(inner: Arc<dyn StatisticsProvider>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        call: impl std::future::Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

#[async_trait]
impl StatisticsProvider for TimeoutProvider {
    async fn metadata(&self, image: &ImageSource) -> Result<ImageMetadata, ProviderError> {
        self.bounded(self.inner.metadata(image)).await
    }

    async fn stats(
        &self,
        image: &ImageSource,
        resize: Option<ResizeSpec>,
    ) -> Result<ChannelStats, ProviderError> {
        self.bounded(self.inner.stats(image, resize)).await
    }

    async fn convolution_stats(
        &self,
        image: &ImageSource,
        kernel: &Kernel,
    ) -> Result<ChannelStats, ProviderError> {
        self.bounded(self.inner.convolution_stats(image, kernel)).await
    }
}
