// src/analysis/content.rs
use serde::{Deserialize, Serialize};

use crate::analysis::color::{Brightness, ColorProfile, DominantColor, Level};
use crate::models::BasicInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    SkyOutdoor,
    NatureOutdoor,
    IndoorNight,
    PanoramicLandscape,
    PortraitClose,
    #[serde(rename = "general_scene")]
    General,
}

impl Scene {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scene::SkyOutdoor => "sky_outdoor",
            Scene::NatureOutdoor => "nature_outdoor",
            Scene::IndoorNight => "indoor_night",
            Scene::PanoramicLandscape => "panoramic_landscape",
            Scene::PortraitClose => "portrait_close",
            Scene::General => "general_scene",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Portrait,
    Landscape,
    Architecture,
    TextDocument,
    Photography,
    General,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Portrait => "portrait",
            ContentType::Landscape => "landscape",
            ContentType::Architecture => "architecture",
            ContentType::TextDocument => "text_document",
            ContentType::Photography => "photography",
            ContentType::General => "general",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composition {
    SquareCentered,
    PanoramicWide,
    VerticalPortrait,
    HorizontalLandscape,
    #[serde(rename = "standard_composition")]
    Standard,
}

impl Composition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Composition::SquareCentered => "square_centered",
            Composition::PanoramicWide => "panoramic_wide",
            Composition::VerticalPortrait => "vertical_portrait",
            Composition::HorizontalLandscape => "horizontal_landscape",
            Composition::Standard => "standard_composition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lighting {
    StrongDirectional,
    SoftDiffused,
    DramaticShadow,
    LowAmbient,
    NaturalBalanced,
}

impl Lighting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lighting::StrongDirectional => "strong_directional",
            Lighting::SoftDiffused => "soft_diffused",
            Lighting::DramaticShadow => "dramatic_shadow",
            Lighting::LowAmbient => "low_ambient",
            Lighting::NaturalBalanced => "natural_balanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Energetic,
    Warm,
    Calm,
    Melancholic,
    Peaceful,
    Mysterious,
    Dramatic,
    Vibrant,
    Neutral,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Energetic => "energetic",
            Mood::Warm => "warm",
            Mood::Calm => "calm",
            Mood::Melancholic => "melancholic",
            Mood::Peaceful => "peaceful",
            Mood::Mysterious => "mysterious",
            Mood::Dramatic => "dramatic",
            Mood::Vibrant => "vibrant",
            Mood::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Excellent,
    Good,
    Fair,
    Basic,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Excellent => "excellent",
            Quality::Good => "good",
            Quality::Fair => "fair",
            Quality::Basic => "basic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalNote {
    UltraHighResolution,
    HighResolution,
    AlphaChannel,
    Lossless,
    Lossy,
    LargeFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub scene: Scene,
    pub content_type: ContentType,
    pub composition: Composition,
    pub lighting: Lighting,
    pub mood: Mood,
    pub quality: Quality,
    pub technical_notes: Vec<TechnicalNote>,
}

pub struct ContentAnalyzer;

impl ContentAnalyzer {
    pub fn analyze(basic: &BasicInfo, color: &ColorProfile) -> ContentAnalysis {
        ContentAnalysis {
            scene: Self::scene(basic, color),
            content_type: Self::content_type(basic, color),
            composition: Self::composition(basic.aspect_ratio),
            lighting: Self::lighting(color),
            mood: Self::mood(color),
            quality: Self::quality(basic, color),
            technical_notes: Self::technical_notes(basic),
        }
    }

    pub fn scene(basic: &BasicInfo, color: &ColorProfile) -> Scene {
        match (color.dominant_color, color.brightness, color.colorfulness) {
            (DominantColor::Blue, Brightness::Bright, _) => Scene::SkyOutdoor,
            (DominantColor::Green, _, Level::High) => Scene::NatureOutdoor,
            (_, Brightness::Dark, Level::Low) => Scene::IndoorNight,
            _ if basic.aspect_ratio > 2.0 => Scene::PanoramicLandscape,
            _ if basic.aspect_ratio < 0.8 => Scene::PortraitClose,
            _ => Scene::General,
        }
    }

    pub fn content_type(basic: &BasicInfo, color: &ColorProfile) -> ContentType {
        let high_contrast = color.contrast == Level::High;
        if basic.aspect_ratio < 0.8 && high_contrast {
            ContentType::Portrait
        } else if basic.aspect_ratio > 1.5 && color.dominant_color == DominantColor::Green {
            ContentType::Landscape
        } else if color.brightness == Brightness::Bright && high_contrast {
            ContentType::Architecture
        } else if color.dominant_color == DominantColor::Black && high_contrast {
            ContentType::TextDocument
        } else if basic.megapixels > 5.0 && high_contrast {
            ContentType::Photography
        } else {
            ContentType::General
        }
    }

    pub fn composition(aspect_ratio: f64) -> Composition {
        if (aspect_ratio - 1.0).abs() < 0.1 {
            Composition::SquareCentered
        } else if aspect_ratio > 2.0 {
            Composition::PanoramicWide
        } else if aspect_ratio < 0.7 {
            Composition::VerticalPortrait
        } else if aspect_ratio > 1.2 && aspect_ratio < 1.8 {
            Composition::HorizontalLandscape
        } else {
            Composition::Standard
        }
    }

    pub fn lighting(color: &ColorProfile) -> Lighting {
        match (color.brightness, color.contrast) {
            (Brightness::Bright, Level::High) => Lighting::StrongDirectional,
            (Brightness::Bright, Level::Low) => Lighting::SoftDiffused,
            (Brightness::Dark, Level::High) => Lighting::DramaticShadow,
            (Brightness::Dark, Level::Low) => Lighting::LowAmbient,
            _ => Lighting::NaturalBalanced,
        }
    }

    pub fn mood(color: &ColorProfile) -> Mood {
        let bright = color.brightness == Brightness::Bright;
        match color.dominant_color {
            DominantColor::Red | DominantColor::Orange if bright => Mood::Energetic,
            DominantColor::Red | DominantColor::Orange => Mood::Warm,
            DominantColor::Blue if bright => Mood::Calm,
            DominantColor::Blue => Mood::Melancholic,
            DominantColor::Green => Mood::Peaceful,
            DominantColor::Purple => Mood::Mysterious,
            _ if color.brightness == Brightness::Dark => Mood::Dramatic,
            _ if color.colorfulness == Level::High => Mood::Vibrant,
            _ => Mood::Neutral,
        }
    }

    pub fn quality(basic: &BasicInfo, color: &ColorProfile) -> Quality {
        let mut points = 0;
        if basic.megapixels > 5.0 {
            points += 2;
        } else if basic.megapixels > 2.0 {
            points += 1;
        }
        if color.contrast == Level::High {
            points += 1;
        }
        if basic.has_alpha {
            points += 1;
        }

        match points {
            p if p >= 3 => Quality::Excellent,
            2 => Quality::Good,
            1 => Quality::Fair,
            _ => Quality::Basic,
        }
    }

    pub fn technical_notes(basic: &BasicInfo) -> Vec<TechnicalNote> {
        let mut notes = Vec::new();
        if basic.megapixels > 10.0 {
            notes.push(TechnicalNote::UltraHighResolution);
        } else if basic.megapixels > 5.0 {
            notes.push(TechnicalNote::HighResolution);
        }
        if basic.has_alpha {
            notes.push(TechnicalNote::AlphaChannel);
        }
        if basic.format.is_lossless() {
            notes.push(TechnicalNote::Lossless);
        } else if basic.format.is_lossy() {
            notes.push(TechnicalNote::Lossy);
        }
        if basic.width > 3000 || basic.height > 3000 {
            notes.push(TechnicalNote::LargeFormat);
        }
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::predicates::fixtures::{basic, color};
    use crate::models::ImageFormat;

    #[test]
    fn bright_blue_is_sky() {
        let info = basic(1600, 900);
        let sky = color(DominantColor::Blue, Brightness::Bright, Level::Low, Level::Low);
        let content = ContentAnalyzer::analyze(&info, &sky);
        assert_eq!(content.scene, Scene::SkyOutdoor);
        assert_eq!(content.lighting, Lighting::SoftDiffused);
        assert_eq!(content.mood, Mood::Calm);
        assert_eq!(content.composition, Composition::HorizontalLandscape);
    }

    #[test]
    fn scene_falls_back_to_framing() {
        let neutral = color(DominantColor::Gray, Brightness::Medium, Level::Medium, Level::Medium);
        assert_eq!(
            ContentAnalyzer::scene(&basic(3000, 1000), &neutral),
            Scene::PanoramicLandscape
        );
        assert_eq!(
            ContentAnalyzer::scene(&basic(600, 1000), &neutral),
            Scene::PortraitClose
        );
        assert_eq!(ContentAnalyzer::scene(&basic(1000, 900), &neutral), Scene::General);
    }

    #[test]
    fn content_type_priority() {
        let ink = color(DominantColor::Black, Brightness::Dark, Level::High, Level::Low);
        assert_eq!(
            ContentAnalyzer::content_type(&basic(600, 1000), &ink),
            ContentType::Portrait
        );
        assert_eq!(
            ContentAnalyzer::content_type(&basic(1000, 1000), &ink),
            ContentType::TextDocument
        );
        let leafy = color(DominantColor::Green, Brightness::Medium, Level::Low, Level::High);
        assert_eq!(
            ContentAnalyzer::content_type(&basic(2000, 1000), &leafy),
            ContentType::Landscape
        );
    }

    #[test]
    fn composition_buckets() {
        assert_eq!(ContentAnalyzer::composition(1.05), Composition::SquareCentered);
        assert_eq!(ContentAnalyzer::composition(2.5), Composition::PanoramicWide);
        assert_eq!(ContentAnalyzer::composition(0.5), Composition::VerticalPortrait);
        assert_eq!(ContentAnalyzer::composition(1.5), Composition::HorizontalLandscape);
        assert_eq!(ContentAnalyzer::composition(0.8), Composition::Standard);
        assert_eq!(ContentAnalyzer::composition(1.9), Composition::Standard);
    }

    #[test]
    fn mood_table() {
        let m = |c, b, f| ContentAnalyzer::mood(&color(c, b, Level::Medium, f));
        assert_eq!(m(DominantColor::Red, Brightness::Bright, Level::Low), Mood::Energetic);
        assert_eq!(m(DominantColor::Orange, Brightness::Dark, Level::Low), Mood::Warm);
        assert_eq!(m(DominantColor::Blue, Brightness::Medium, Level::Low), Mood::Melancholic);
        assert_eq!(m(DominantColor::Purple, Brightness::Dark, Level::Low), Mood::Mysterious);
        assert_eq!(m(DominantColor::Gray, Brightness::Dark, Level::High), Mood::Dramatic);
        assert_eq!(m(DominantColor::Pink, Brightness::Medium, Level::High), Mood::Vibrant);
        assert_eq!(m(DominantColor::White, Brightness::Bright, Level::Low), Mood::Neutral);
    }

    #[test]
    fn quality_points() {
        let crisp = color(DominantColor::Gray, Brightness::Medium, Level::High, Level::Low);
        let flat = color(DominantColor::Gray, Brightness::Medium, Level::Low, Level::Low);
        assert_eq!(ContentAnalyzer::quality(&basic(4000, 3000), &crisp), Quality::Excellent);
        assert_eq!(ContentAnalyzer::quality(&basic(4000, 3000), &flat), Quality::Good);
        assert_eq!(ContentAnalyzer::quality(&basic(2000, 1500), &flat), Quality::Fair);
        assert_eq!(ContentAnalyzer::quality(&basic(800, 600), &flat), Quality::Basic);
    }

    #[test]
    fn technical_notes_for_large_png_with_alpha() {
        let mut info = basic(4000, 3000);
        info.format = ImageFormat::Png;
        info.has_alpha = true;
        assert_eq!(
            ContentAnalyzer::technical_notes(&info),
            vec![
                TechnicalNote::UltraHighResolution,
                TechnicalNote::AlphaChannel,
                TechnicalNote::Lossless,
                TechnicalNote::LargeFormat
            ]
        );
        assert_eq!(
            ContentAnalyzer::technical_notes(&basic(800, 600)),
            vec![TechnicalNote::Lossy]
        );
    }
}
