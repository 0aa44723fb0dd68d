// src/services/image_processor.rs
use std::io::Cursor;

use async_trait::async_trait;
use image::imageops::FilterType;
use image::io::Reader;
use image::{DynamicImage, GenericImageView, ImageError, ImageFormat as ImgFormat};

use crate::models::{ChannelStat, ChannelStats, ImageFormat, ImageMetadata};
use crate::provider::{ImageSource, Kernel, ProviderError, ResizeSpec, StatisticsProvider};

/// Statistics provider backed by the `image` crate. Decoding and pixel work
/// run on the blocking pool.
pub struct ImageProcessor {
    max_dimension: u32,
}

impl ImageProcessor {
    pub fn new(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    async fn with_decoded<T, F>(&self, image: &ImageSource, work: F) -> Result<T, ProviderError>
    where
        F: FnOnce(DynamicImage, ImageFormat) -> T + Send + 'static,
        T: Send + 'static,
    {
        let data = image.data.clone();
        let max_dimension = self.max_dimension;
        tokio::task::spawn_blocking(move || {
            let (img, format) = decode(&data, max_dimension)?;
            Ok(work(img, format))
        })
        .await
        .map_err(|e| ProviderError::Task(e.to_string()))?
    }
}

fn reader(data: &[u8]) -> Result<Reader<Cursor<&[u8]>>, ProviderError> {
    Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProviderError::Decode(e.to_string()))
}

fn decode(data: &[u8], max_dimension: u32) -> Result<(DynamicImage, ImageFormat), ProviderError> {
    let header = reader(data)?;
    let format = header.format().ok_or(ProviderError::UnsupportedFormat)?;

    // Header only, so oversized images are rejected before allocation.
    let (width, height) = header.into_dimensions().map_err(image_error)?;
    if width > max_dimension || height > max_dimension {
        return Err(ProviderError::TooLarge {
            width,
            height,
            max: max_dimension,
        });
    }

    let img = reader(data)?.decode().map_err(image_error)?;
    Ok((img, map_format(format)))
}

fn image_error(err: ImageError) -> ProviderError {
    match err {
        ImageError::Unsupported(_) => ProviderError::UnsupportedFormat,
        other => ProviderError::Decode(other.to_string()),
    }
}

fn map_format(format: ImgFormat) -> ImageFormat {
    match format {
        ImgFormat::Jpeg => ImageFormat::Jpeg,
        ImgFormat::Png => ImageFormat::Png,
        ImgFormat::Gif => ImageFormat::Gif,
        ImgFormat::WebP => ImageFormat::Webp,
        ImgFormat::Bmp => ImageFormat::Bmp,
        ImgFormat::Tiff => ImageFormat::Tiff,
        _ => ImageFormat::Other,
    }
}

fn metadata_of(img: &DynamicImage, format: ImageFormat) -> ImageMetadata {
    let color = img.color();
    let (width, height) = img.dimensions();
    ImageMetadata {
        width,
        height,
        format,
        channels: color.channel_count(),
        has_alpha: color.has_alpha(),
    }
}

/// Population mean and standard deviation per channel, on the 0-255 scale.
fn pixel_stats(img: &DynamicImage) -> ChannelStats {
    match img.color().channel_count() {
        1 => interleaved_stats(img.to_luma8().as_raw(), 1),
        2 => interleaved_stats(img.to_luma_alpha8().as_raw(), 2),
        3 => interleaved_stats(img.to_rgb8().as_raw(), 3),
        _ => interleaved_stats(img.to_rgba8().as_raw(), 4),
    }
}

fn interleaved_stats(samples: &[u8], channels: usize) -> ChannelStats {
    let pixels = samples.len() / channels;
    if pixels == 0 {
        return ChannelStats::default();
    }

    let mut sum = vec![0.0f64; channels];
    let mut sum_sq = vec![0.0f64; channels];
    for pixel in samples.chunks_exact(channels) {
        for (i, &value) in pixel.iter().enumerate() {
            let v = value as f64;
            sum[i] += v;
            sum_sq[i] += v * v;
        }
    }

    let n = pixels as f64;
    ChannelStats::new(
        sum.iter()
            .zip(&sum_sq)
            .map(|(s, sq)| {
                let mean = s / n;
                let variance = (sq / n - mean * mean).max(0.0);
                ChannelStat::new(mean, variance.sqrt())
            })
            .collect(),
    )
}

#[async_trait]
impl StatisticsProvider for ImageProcessor {
    async fn metadata(&self, image: &ImageSource) -> Result<ImageMetadata, ProviderError> {
        self.with_decoded(image, |img, format| metadata_of(&img, format))
            .await
    }

    async fn stats(
        &self,
        image: &ImageSource,
        resize: Option<ResizeSpec>,
    ) -> Result<ChannelStats, ProviderError> {
        self.with_decoded(image, move |img, _| match resize {
            Some(spec) => pixel_stats(&img.resize(spec.size, spec.size, FilterType::Triangle)),
            None => pixel_stats(&img),
        })
        .await
    }

    async fn convolution_stats(
        &self,
        image: &ImageSource,
        kernel: &Kernel,
    ) -> Result<ChannelStats, ProviderError> {
        let weights = kernel.weights;
        self.with_decoded(image, move |img, _| {
            let filtered = img.grayscale().filter3x3(&weights);
            interleaved_stats(filtered.to_luma8().as_raw(), 1)
        })
        .await
    }
}
