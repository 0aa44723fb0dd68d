// src/analysis/tags.rs
use crate::analysis::color::ColorProfile;
use crate::analysis::content::{ContentAnalysis, TechnicalNote};
use crate::models::{BasicInfo, DetectionResult};

const HIGH_CONFIDENCE: f64 = 0.7;
const MEDIUM_CONFIDENCE: f64 = 0.5;

pub fn size_bucket(width: u32, height: u32) -> &'static str {
    let area = width as u64 * height as u64;
    match area {
        a if a < 100_000 => "small",
        a if a < 2_000_000 => "medium",
        a if a < 8_000_000 => "large",
        _ => "huge",
    }
}

pub fn aspect_bucket(ratio: f64) -> &'static str {
    if (ratio - 1.0).abs() < 0.1 {
        "square"
    } else if ratio > 2.0 {
        "panoramic"
    } else if ratio > 1.2 {
        "landscape"
    } else {
        "portrait"
    }
}

fn note_tags(note: TechnicalNote) -> &'static [&'static str] {
    match note {
        TechnicalNote::UltraHighResolution => &["professional", "print-ready"],
        TechnicalNote::HighResolution => &["professional"],
        TechnicalNote::AlphaChannel => &["alpha-channel"],
        TechnicalNote::Lossless => &["lossless"],
        TechnicalNote::Lossy | TechnicalNote::LargeFormat => &[],
    }
}

/// Ordered, additive tag list. Duplicates are kept.
pub fn generate(
    basic: Option<&BasicInfo>,
    color: &ColorProfile,
    content: Option<&ContentAnalysis>,
    detection: &DetectionResult,
) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    if let Some(basic) = basic {
        tags.push(basic.format.as_str().to_uppercase());
        tags.push(size_bucket(basic.width, basic.height).to_string());
        tags.push(aspect_bucket(basic.aspect_ratio).to_string());
    }

    if color.dominant_color.is_known() {
        tags.push(color.dominant_color.as_str().to_string());
    }
    tags.push(color.brightness.as_str().to_string());
    tags.push(format!("{}-contrast", color.contrast.as_str()));
    tags.push(format!("{}-colorful", color.colorfulness.as_str()));

    if !detection.is_empty() {
        for candidate in &detection.candidates {
            let name = candidate.category.as_str();
            tags.push(name.to_string());
            if candidate.score > HIGH_CONFIDENCE {
                tags.push(format!("high-confidence-{}", name));
            } else if candidate.score > MEDIUM_CONFIDENCE {
                tags.push(format!("medium-confidence-{}", name));
            }
        }
        if let Some(primary) = detection.primary {
            tags.push(format!("primary-{}", primary.as_str()));
        }
        if detection.candidates.len() > 1 {
            tags.push("multiple-objects".to_string());
        } else {
            tags.push("single-object".to_string());
        }
    }

    if let Some(basic) = basic {
        if basic.megapixels > 10.0 {
            tags.push("high-resolution".to_string());
        } else if basic.megapixels < 1.0 {
            tags.push("low-resolution".to_string());
        }
        if basic.has_alpha {
            tags.push("transparent".to_string());
        }
    }

    if let Some(content) = content {
        tags.push(content.content_type.as_str().to_string());
        tags.push(content.scene.as_str().to_string());
        tags.push(content.composition.as_str().to_string());
        tags.push(content.lighting.as_str().to_string());
        tags.push(content.mood.as_str().to_string());
        tags.push(format!("{}-quality", content.quality.as_str()));
        for note in &content.technical_notes {
            tags.extend(note_tags(*note).iter().map(|t| t.to_string()));
        }
    }

    tags
}
