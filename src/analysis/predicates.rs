// src/analysis/predicates.rs
use serde::{Deserialize, Serialize};

use crate::analysis::color::{Brightness, ColorProfile, DominantColor, Level};
use crate::analysis::features::{FeatureVector, TextureType};
use crate::models::BasicInfo;

use DominantColor::{Black, Blue, Brown, Gray, Green, Pink, White, Yellow};

/// Everything a template predicate may look at.
#[derive(Debug, Clone, Copy)]
pub struct FeatureContext<'a> {
    pub basic: &'a BasicInfo,
    pub color: &'a ColorProfile,
    pub features: &'a FeatureVector,
}

impl<'a> FeatureContext<'a> {
    pub fn new(basic: &'a BasicInfo, color: &'a ColorProfile, features: &'a FeatureVector) -> Self {
        Self {
            basic,
            color,
            features,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturePredicate {
    OrganicShapes,
    GeometricShapes,
    HighMetallic,
    GeometricDominant,
    HorizontalDominant,
    VerticalStructures,
    OrganicTexture,
    SkinTones,
    NaturalColors,
    ArtificialLighting,
    FurTexture,
    MetallicColors,
    CloseUp,
    RichColors,
    LargeScale,
    HighContrast,
    StructuredLayout,
    MediumComplexity,
    SmallScale,
}

type PredicateFn = fn(&FeatureContext<'_>) -> bool;

impl FeaturePredicate {
    pub const ALL: [FeaturePredicate; 19] = [
        FeaturePredicate::OrganicShapes,
        FeaturePredicate::GeometricShapes,
        FeaturePredicate::HighMetallic,
        FeaturePredicate::GeometricDominant,
        FeaturePredicate::HorizontalDominant,
        FeaturePredicate::VerticalStructures,
        FeaturePredicate::OrganicTexture,
        FeaturePredicate::SkinTones,
        FeaturePredicate::NaturalColors,
        FeaturePredicate::ArtificialLighting,
        FeaturePredicate::FurTexture,
        FeaturePredicate::MetallicColors,
        FeaturePredicate::CloseUp,
        FeaturePredicate::RichColors,
        FeaturePredicate::LargeScale,
        FeaturePredicate::HighContrast,
        FeaturePredicate::StructuredLayout,
        FeaturePredicate::MediumComplexity,
        FeaturePredicate::SmallScale,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FeaturePredicate::OrganicShapes => "organic_shapes",
            FeaturePredicate::GeometricShapes => "geometric_shapes",
            FeaturePredicate::HighMetallic => "high_metallic",
            FeaturePredicate::GeometricDominant => "geometric_dominant",
            FeaturePredicate::HorizontalDominant => "horizontal_dominant",
            FeaturePredicate::VerticalStructures => "vertical_structures",
            FeaturePredicate::OrganicTexture => "organic_texture",
            FeaturePredicate::SkinTones => "skin_tones",
            FeaturePredicate::NaturalColors => "natural_colors",
            FeaturePredicate::ArtificialLighting => "artificial_lighting",
            FeaturePredicate::FurTexture => "fur_texture",
            FeaturePredicate::MetallicColors => "metallic_colors",
            FeaturePredicate::CloseUp => "close_up",
            FeaturePredicate::RichColors => "rich_colors",
            FeaturePredicate::LargeScale => "large_scale",
            FeaturePredicate::HighContrast => "high_contrast",
            FeaturePredicate::StructuredLayout => "structured_layout",
            FeaturePredicate::MediumComplexity => "medium_complexity",
            FeaturePredicate::SmallScale => "small_scale",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    fn predicate(&self) -> PredicateFn {
        match self {
            FeaturePredicate::OrganicShapes => organic_shapes,
            FeaturePredicate::GeometricShapes => geometric_shapes,
            FeaturePredicate::HighMetallic => high_metallic,
            FeaturePredicate::GeometricDominant => geometric_dominant,
            FeaturePredicate::HorizontalDominant => horizontal_dominant,
            FeaturePredicate::VerticalStructures => vertical_structures,
            FeaturePredicate::OrganicTexture => organic_texture,
            FeaturePredicate::SkinTones => skin_tones,
            FeaturePredicate::NaturalColors => natural_colors,
            FeaturePredicate::ArtificialLighting => artificial_lighting,
            FeaturePredicate::FurTexture => fur_texture,
            FeaturePredicate::MetallicColors => metallic_colors,
            FeaturePredicate::CloseUp => close_up,
            FeaturePredicate::RichColors => rich_colors,
            FeaturePredicate::LargeScale => large_scale,
            FeaturePredicate::HighContrast => high_contrast,
            FeaturePredicate::StructuredLayout => structured_layout,
            FeaturePredicate::MediumComplexity => medium_complexity,
            FeaturePredicate::SmallScale => small_scale,
        }
    }

    pub fn evaluate(&self, ctx: &FeatureContext<'_>) -> bool {
        (self.predicate())(ctx)
    }

    /// Evaluate by name; names outside the closed set are false.
    pub fn evaluate_named(name: &str, ctx: &FeatureContext<'_>) -> bool {
        Self::from_name(name).is_some_and(|p| p.evaluate(ctx))
    }
}

const NEUTRAL_TONES: [DominantColor; 3] = [Gray, White, Black];
const SKIN_COLORS: [DominantColor; 3] = [Pink, Brown, Yellow];
const FUR_COLORS: [DominantColor; 4] = [Brown, Gray, Black, White];

fn organic_shapes(ctx: &FeatureContext<'_>) -> bool {
    ctx.features.has_organic_shapes && ctx.features.edge_complexity > 0.3
}

fn geometric_shapes(ctx: &FeatureContext<'_>) -> bool {
    let f = ctx.features;
    f.has_vertical_structures || f.has_horizontal_structures || f.symmetry > 0.6
}

fn high_metallic(ctx: &FeatureContext<'_>) -> bool {
    ctx.color.dominant_color.is_one_of(&NEUTRAL_TONES)
        && ctx.color.brightness == Brightness::Bright
        && ctx.color.contrast == Level::High
}

fn geometric_dominant(ctx: &FeatureContext<'_>) -> bool {
    ctx.features.symmetry > 0.7 && ctx.features.edge_complexity > 0.6
}

fn horizontal_dominant(ctx: &FeatureContext<'_>) -> bool {
    ctx.basic.aspect_ratio > 1.5 && ctx.features.has_horizontal_structures
}

fn vertical_structures(ctx: &FeatureContext<'_>) -> bool {
    ctx.features.has_vertical_structures && ctx.basic.aspect_ratio < 1.5
}

fn organic_texture(ctx: &FeatureContext<'_>) -> bool {
    ctx.features.texture_type == TextureType::Organic && ctx.features.color_variation > 0.3
}

fn skin_tones(ctx: &FeatureContext<'_>) -> bool {
    ctx.color.dominant_color.is_one_of(&SKIN_COLORS) && ctx.color.brightness != Brightness::Dark
}

fn natural_colors(ctx: &FeatureContext<'_>) -> bool {
    ctx.color.dominant_color.is_one_of(&[Green, Blue, Brown])
        && ctx.color.colorfulness == Level::High
}

fn artificial_lighting(ctx: &FeatureContext<'_>) -> bool {
    ctx.color.brightness == Brightness::Bright && ctx.color.contrast == Level::High
}

fn fur_texture(ctx: &FeatureContext<'_>) -> bool {
    ctx.features.texture_type == TextureType::Organic
        && ctx.color.dominant_color.is_one_of(&FUR_COLORS)
}

fn metallic_colors(ctx: &FeatureContext<'_>) -> bool {
    ctx.color.dominant_color.is_one_of(&NEUTRAL_TONES) && ctx.color.contrast == Level::High
}

fn close_up(ctx: &FeatureContext<'_>) -> bool {
    ctx.basic.megapixels < 3.0 && ctx.color.brightness != Brightness::Dark
}

fn rich_colors(ctx: &FeatureContext<'_>) -> bool {
    ctx.color.colorfulness == Level::High
}

fn large_scale(ctx: &FeatureContext<'_>) -> bool {
    ctx.basic.megapixels > 5.0
}

fn high_contrast(ctx: &FeatureContext<'_>) -> bool {
    ctx.color.contrast == Level::High
}

fn structured_layout(ctx: &FeatureContext<'_>) -> bool {
    ctx.features.symmetry > 0.5 && ctx.features.edge_complexity > 0.4
}

fn medium_complexity(ctx: &FeatureContext<'_>) -> bool {
    ctx.features.edge_complexity > 0.3 && ctx.features.edge_complexity < 0.7
}

fn small_scale(ctx: &FeatureContext<'_>) -> bool {
    ctx.basic.megapixels < 1.0
}

/// Shared fixtures for the engine's unit tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::models::ImageFormat;
    use proptest::prelude::*;
    use proptest::sample::select;

    const COLORS: [DominantColor; 12] = [
        DominantColor::Red,
        DominantColor::Orange,
        DominantColor::Yellow,
        Green,
        Blue,
        DominantColor::Purple,
        Pink,
        Brown,
        Gray,
        Black,
        White,
        DominantColor::Unknown,
    ];
    const LEVELS: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    pub fn basic(width: u32, height: u32) -> BasicInfo {
        BasicInfo::from_metadata(
            "fixture.jpg",
            0,
            &crate::models::ImageMetadata {
                width,
                height,
                format: ImageFormat::Jpeg,
                channels: 3,
                has_alpha: false,
            },
        )
    }

    pub fn color(
        dominant_color: DominantColor,
        brightness: Brightness,
        contrast: Level,
        colorfulness: Level,
    ) -> ColorProfile {
        ColorProfile {
            dominant_color,
            brightness,
            contrast,
            colorfulness,
        }
    }

    pub fn any_basic() -> impl Strategy<Value = BasicInfo> {
        (1u32..12_000, 1u32..12_000).prop_map(|(width, height)| basic(width, height))
    }

    pub fn any_color() -> impl Strategy<Value = ColorProfile> {
        (
            select(COLORS.to_vec()),
            select(vec![Brightness::Dark, Brightness::Medium, Brightness::Bright]),
            select(LEVELS.to_vec()),
            select(LEVELS.to_vec()),
        )
            .prop_map(|(dominant, brightness, contrast, colorfulness)| {
                color(dominant, brightness, contrast, colorfulness)
            })
    }

    pub fn any_features() -> impl Strategy<Value = FeatureVector> {
        (
            any::<[bool; 5]>(),
            0.0..2.0f64,
            0.0..3.0f64,
            0.0..=1.0f64,
            select(vec![
                TextureType::Uniform,
                TextureType::Organic,
                TextureType::Complex,
                TextureType::Unknown,
            ]),
        )
            .prop_map(|(flags, edge_complexity, color_variation, symmetry, texture_type)| {
                FeatureVector {
                    has_high_frequency: flags[0],
                    has_vertical_structures: flags[1],
                    has_horizontal_structures: flags[2],
                    has_circular_shapes: flags[3],
                    has_organic_shapes: flags[4],
                    edge_complexity,
                    color_variation,
                    symmetry,
                    texture_type,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{basic, color};
    use super::*;

    #[test]
    fn names_round_trip_through_the_closed_set() {
        for p in FeaturePredicate::ALL {
            assert_eq!(FeaturePredicate::from_name(p.name()), Some(p));
        }
        assert_eq!(FeaturePredicate::from_name("glowing_eyes"), None);
    }

    #[test]
    fn unknown_names_evaluate_false() {
        let info = basic(800, 600);
        let profile = ColorProfile::default();
        let features = FeatureVector::default();
        let ctx = FeatureContext {
            basic: &info,
            color: &profile,
            features: &features,
        };
        assert!(!FeaturePredicate::evaluate_named("wheels", &ctx));
        assert!(FeaturePredicate::evaluate_named("close_up", &ctx));
    }

    #[test]
    fn skin_tones_require_light_warm_color() {
        let info = basic(600, 800);
        let features = FeatureVector::default();
        let warm = color(Pink, Brightness::Medium, Level::Low, Level::Low);
        let dark = color(Pink, Brightness::Dark, Level::Low, Level::Low);
        let lit = FeatureContext::new(&info, &warm, &features);
        let shadowed = FeatureContext::new(&info, &dark, &features);
        assert!(FeaturePredicate::SkinTones.evaluate(&lit));
        assert!(!FeaturePredicate::SkinTones.evaluate(&shadowed));
    }

    #[test]
    fn metallic_predicates() {
        let info = basic(1600, 800);
        let features = FeatureVector::default();
        let steel = color(Gray, Brightness::Bright, Level::High, Level::Low);
        let ctx = FeatureContext {
            basic: &info,
            color: &steel,
            features: &features,
        };
        assert!(FeaturePredicate::HighMetallic.evaluate(&ctx));
        assert!(FeaturePredicate::MetallicColors.evaluate(&ctx));
        assert!(FeaturePredicate::ArtificialLighting.evaluate(&ctx));
        assert!(!FeaturePredicate::FurTexture.evaluate(&ctx));
    }

    #[test]
    fn structural_predicates_follow_features() {
        let info = basic(2000, 1000);
        let profile = ColorProfile::default();
        let features = FeatureVector {
            has_horizontal_structures: true,
            edge_complexity: 0.5,
            symmetry: 0.3,
            texture_type: TextureType::Organic,
            color_variation: 0.4,
            has_organic_shapes: true,
            ..FeatureVector::default()
        };
        let ctx = FeatureContext {
            basic: &info,
            color: &profile,
            features: &features,
        };
        assert!(FeaturePredicate::GeometricShapes.evaluate(&ctx));
        assert!(FeaturePredicate::HorizontalDominant.evaluate(&ctx));
        assert!(!FeaturePredicate::VerticalStructures.evaluate(&ctx));
        assert!(FeaturePredicate::MediumComplexity.evaluate(&ctx));
        assert!(FeaturePredicate::OrganicShapes.evaluate(&ctx));
        assert!(FeaturePredicate::OrganicTexture.evaluate(&ctx));
        assert!(!FeaturePredicate::StructuredLayout.evaluate(&ctx));
        assert!(!FeaturePredicate::GeometricDominant.evaluate(&ctx));
    }

    #[test]
    fn scale_predicates_use_megapixels() {
        let profile = ColorProfile::default();
        let features = FeatureVector::default();
        let small = basic(640, 480);
        let large = basic(4000, 3000);
        let small_ctx = FeatureContext::new(&small, &profile, &features);
        let large_ctx = FeatureContext::new(&large, &profile, &features);
        assert!(FeaturePredicate::SmallScale.evaluate(&small_ctx));
        assert!(!FeaturePredicate::LargeScale.evaluate(&small_ctx));
        assert!(FeaturePredicate::LargeScale.evaluate(&large_ctx));
        assert!(!FeaturePredicate::CloseUp.evaluate(&large_ctx));
    }
}
