// src/analysis/description.rs
//! Deterministic English descriptions built from fixed phrase tables.

use crate::analysis::catalog::Category;
use crate::analysis::content::{
    Composition, ContentAnalysis, ContentType, Lighting, Mood, Quality, Scene, TechnicalNote,
};
use crate::models::{DetectionCandidate, DetectionResult};

const SECONDARY_LIMIT: usize = 2;

pub struct DescriptionComposer;

impl DescriptionComposer {
    pub fn compose(content: Option<&ContentAnalysis>, detection: &DetectionResult) -> String {
        let advanced: Vec<&DetectionCandidate> = detection.advanced_candidates().collect();
        if let Some(lead) = Self::advanced_sentence(&advanced) {
            return Self::extend_advanced(lead, content, detection);
        }

        let mut text = match (detection.primary, content) {
            (Some(primary), _) => Self::detection_sentence(primary, detection),
            (None, Some(content)) => content_type_phrase(content.content_type).to_string(),
            (None, None) => "This is an image".to_string(),
        };

        if let Some(content) = content {
            Self::append_content(&mut text, content);
        }
        text.push('.');
        text
    }

    /// Summary of the advanced pass; `None` when it detected nothing.
    fn advanced_sentence(advanced: &[&DetectionCandidate]) -> Option<String> {
        let (main, others) = advanced.split_first()?;
        let qualifier = if main.score > 0.8 {
            "high confidence"
        } else if main.score > 0.6 {
            "medium confidence"
        } else {
            "low confidence"
        };

        let mut text = format!(
            "Advanced analysis identified {} ({})",
            article(main.category.label()),
            qualifier
        );
        if !main.matched_features.is_empty() {
            text.push_str(", with key features: ");
            text.push_str(&main.matched_features.join(", "));
        }
        if !others.is_empty() {
            let labels: Vec<&str> = others
                .iter()
                .take(SECONDARY_LIMIT)
                .map(|c| c.category.label())
                .collect();
            let verb = if labels.len() == 1 { "was" } else { "were" };
            text.push_str("; possible ");
            text.push_str(&labels.join(" and "));
            text.push_str(&format!(" {} also detected", verb));
        }
        Some(text)
    }

    fn extend_advanced(
        mut text: String,
        content: Option<&ContentAnalysis>,
        detection: &DetectionResult,
    ) -> String {
        if let Some(content) = content {
            text.push_str(composition_phrase(content.composition));
            text.push_str(lighting_phrase(content.lighting));
        }
        let max = detection.advanced.as_ref().map_or(0.0, |a| a.max_confidence);
        if max > 0.8 {
            text.push_str(" (high-confidence identification)");
        } else if max > 0.5 {
            text.push_str(" (medium-confidence identification)");
        }
        text.push('.');
        text
    }

    fn detection_sentence(primary: Category, detection: &DetectionResult) -> String {
        let mut text = category_phrase(primary).to_string();
        let others: Vec<&str> = detection
            .candidates
            .iter()
            .filter(|c| c.category != primary)
            .take(SECONDARY_LIMIT)
            .map(|c| c.category.label())
            .collect();
        if !others.is_empty() {
            text.push_str(", alongside ");
            text.push_str(&others.join(" and "));
        }
        text
    }

    fn append_content(text: &mut String, content: &ContentAnalysis) {
        if content.scene != Scene::General {
            text.push_str(scene_phrase(content.scene));
        }
        if content.composition != Composition::Standard {
            text.push_str(composition_phrase(content.composition));
        }
        if content.lighting != Lighting::NaturalBalanced {
            text.push_str(lighting_phrase(content.lighting));
        }
        if content.mood != Mood::Neutral {
            text.push_str(mood_phrase(content.mood));
        }
        if content.quality != Quality::Basic {
            text.push_str(quality_phrase(content.quality));
        }
        for note in &content.technical_notes {
            text.push_str(", ");
            text.push_str(technical_phrase(*note));
        }
    }
}

fn article(label: &str) -> String {
    match label.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => format!("an {}", label),
        _ if label == "text" || label == "food" || label.ends_with("scenery") => label.to_string(),
        _ => format!("a {}", label),
    }
}

fn category_phrase(category: Category) -> &'static str {
    match category {
        Category::Person => "This is a photo featuring a person",
        Category::Vehicle => "This is an image featuring a vehicle",
        Category::Building => "This is a piece of architectural photography",
        Category::Nature => "This is a photo of natural scenery",
        Category::Animal => "This is an image featuring an animal",
        Category::Food => "This is a piece of food photography",
        Category::Text => "This is a document image containing text",
    }
}

fn content_type_phrase(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Portrait => "This is a portrait photo",
        ContentType::Landscape => "This is a landscape photo",
        ContentType::Architecture => "This is a piece of architectural photography",
        ContentType::TextDocument => "This is a document image",
        ContentType::Photography => "This is a photographic work",
        ContentType::General => "This is an image",
    }
}

fn scene_phrase(scene: Scene) -> &'static str {
    match scene {
        Scene::SkyOutdoor => ", taken outdoors under an open sky",
        Scene::NatureOutdoor => ", showing a natural outdoor setting",
        Scene::IndoorNight => ", taken indoors or at night",
        Scene::PanoramicLandscape => ", presenting a wide panoramic view",
        Scene::PortraitClose => ", framed as a close-up",
        Scene::General => ", with a balanced scene",
    }
}

fn composition_phrase(composition: Composition) -> &'static str {
    match composition {
        Composition::SquareCentered => ", using a square centered composition",
        Composition::PanoramicWide => ", using a wide panoramic composition",
        Composition::VerticalPortrait => ", using a vertical portrait composition",
        Composition::HorizontalLandscape => ", using a horizontal landscape composition",
        Composition::Standard => ", with a regular composition",
    }
}

fn lighting_phrase(lighting: Lighting) -> &'static str {
    match lighting {
        Lighting::StrongDirectional => ", with strong directional light",
        Lighting::SoftDiffused => ", with soft diffused light",
        Lighting::DramaticShadow => ", with dramatic light and shadow",
        Lighting::LowAmbient => ", in low ambient light",
        Lighting::NaturalBalanced => ", with natural balanced light",
    }
}

fn mood_phrase(mood: Mood) -> &'static str {
    match mood {
        Mood::Energetic => ", with an energetic atmosphere",
        Mood::Warm => ", giving a warm and cosy feeling",
        Mood::Calm => ", giving a calm and tranquil feeling",
        Mood::Melancholic => ", with a melancholic undertone",
        Mood::Peaceful => ", with a peaceful atmosphere",
        Mood::Mysterious => ", with a mysterious tint",
        Mood::Dramatic => ", with a strongly dramatic effect",
        Mood::Vibrant => ", with vivid lively colors",
        Mood::Neutral => ", with neutral tones",
    }
}

fn quality_phrase(quality: Quality) -> &'static str {
    match quality {
        Quality::Excellent => ", excellent image quality",
        Quality::Good => ", good image quality",
        Quality::Fair => ", fair image quality",
        Quality::Basic => ", basic image quality",
    }
}

fn technical_phrase(note: TechnicalNote) -> &'static str {
    match note {
        TechnicalNote::UltraHighResolution => "ultra-high resolution suitable for printing",
        TechnicalNote::HighResolution => "high resolution suitable for professional use",
        TechnicalNote::AlphaChannel => "includes an alpha channel",
        TechnicalNote::Lossless => "lossless compression format",
        TechnicalNote::Lossy => "lossy compression format",
        TechnicalNote::LargeFormat => "suitable for large-format display",
    }
}
