// src/analysis/catalog.rs
//! Static category templates. Adding a category is a table change; the
//! scoring engine evaluates every entry the same way.

use serde::{Deserialize, Serialize};

use crate::analysis::color::DominantColor;
use crate::analysis::predicates::FeaturePredicate::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Person,
    Vehicle,
    Building,
    Nature,
    Animal,
    Food,
    Text,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Person => "person",
            Category::Vehicle => "vehicle",
            Category::Building => "building",
            Category::Nature => "nature",
            Category::Animal => "animal",
            Category::Food => "food",
            Category::Text => "text",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Person => "person",
            Category::Vehicle => "vehicle",
            Category::Building => "building",
            Category::Nature => "natural scenery",
            Category::Animal => "animal",
            Category::Food => "food",
            Category::Text => "text",
        }
    }
}

/// Color evidence a template hopes to see.
///
/// Only some tags have a matching rule; descriptive tags such as
/// `EarthTones` document intent and score nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPattern {
    Skin,
    Flesh,
    Metallic,
    DarkMetallic,
    Bright,
    Concrete,
    EarthTones,
    FurColors,
    NaturalTones,
    FoodColors,
    WarmTones,
    Colorful,
    HighContrast,
    Monochrome,
    Named(DominantColor),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub lo: f64,
    pub hi: f64,
}

impl Range {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryTemplate {
    pub category: Category,
    pub required: &'static [FeaturePredicate],
    pub excluded: &'static [FeaturePredicate],
    pub aspect_ratio: Range,
    pub color_patterns: &'static [ColorPattern],
    /// Megapixels.
    pub size: Range,
}

pub static CATALOG: [CategoryTemplate; 7] = [
    CategoryTemplate {
        category: Category::Person,
        required: &[OrganicShapes, MediumComplexity],
        excluded: &[HighMetallic, GeometricDominant],
        aspect_ratio: Range::new(0.6, 0.9),
        color_patterns: &[ColorPattern::Skin, ColorPattern::Flesh],
        size: Range::new(0.3, 8.0),
    },
    CategoryTemplate {
        category: Category::Vehicle,
        required: &[GeometricShapes, HorizontalDominant],
        excluded: &[OrganicTexture, SkinTones],
        aspect_ratio: Range::new(1.8, 3.5),
        color_patterns: &[
            ColorPattern::Metallic,
            ColorPattern::Bright,
            ColorPattern::DarkMetallic,
        ],
        size: Range::new(0.2, 15.0),
    },
    CategoryTemplate {
        category: Category::Building,
        required: &[VerticalStructures, GeometricShapes],
        excluded: &[OrganicTexture, SmallScale],
        aspect_ratio: Range::new(0.4, 2.5),
        color_patterns: &[
            ColorPattern::Named(DominantColor::Gray),
            ColorPattern::Named(DominantColor::White),
            ColorPattern::Named(DominantColor::Brown),
            ColorPattern::Concrete,
        ],
        size: Range::new(1.0, 50.0),
    },
    CategoryTemplate {
        category: Category::Nature,
        required: &[OrganicTexture, NaturalColors],
        excluded: &[GeometricDominant, ArtificialLighting],
        aspect_ratio: Range::new(1.2, 3.0),
        color_patterns: &[
            ColorPattern::Named(DominantColor::Green),
            ColorPattern::Named(DominantColor::Blue),
            ColorPattern::EarthTones,
        ],
        size: Range::new(0.5, 50.0),
    },
    CategoryTemplate {
        category: Category::Animal,
        required: &[OrganicShapes, FurTexture],
        excluded: &[GeometricShapes, MetallicColors],
        aspect_ratio: Range::new(0.7, 2.5),
        color_patterns: &[ColorPattern::FurColors, ColorPattern::NaturalTones],
        size: Range::new(0.1, 8.0),
    },
    CategoryTemplate {
        category: Category::Food,
        required: &[CloseUp, RichColors],
        excluded: &[LargeScale, GeometricDominant],
        aspect_ratio: Range::new(0.7, 1.8),
        color_patterns: &[ColorPattern::FoodColors, ColorPattern::WarmTones],
        size: Range::new(0.05, 3.0),
    },
    CategoryTemplate {
        category: Category::Text,
        required: &[HighContrast, StructuredLayout],
        excluded: &[NaturalColors, OrganicShapes],
        aspect_ratio: Range::new(0.6, 1.6),
        color_patterns: &[ColorPattern::HighContrast, ColorPattern::Monochrome],
        size: Range::new(0.1, 10.0),
    },
];

pub fn template(category: Category) -> Option<&'static CategoryTemplate> {
    CATALOG.iter().find(|t| t.category == category)
}
