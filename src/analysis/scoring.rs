// src/analysis/scoring.rs
use crate::analysis::catalog::{CategoryTemplate, ColorPattern};
use crate::analysis::color::{Brightness, ColorProfile, DominantColor, Level};
use crate::analysis::predicates::{FeatureContext, FeaturePredicate};

/// A template fires (becomes a candidate) above this score.
pub const FIRE_THRESHOLD: f64 = 0.3;
/// Scores above this count as high-confidence evidence.
pub const ADVANCED_ELIGIBLE: f64 = 0.5;

const EXCLUDED_PENALTY: f64 = 0.4;
const REQUIRED_CREDIT: f64 = 0.3;
const ASPECT_CREDIT: f64 = 0.25;
const ASPECT_PENALTY: f64 = 0.3;
const ASPECT_TOLERANCE: f64 = 0.5;
const COLOR_CAP: f64 = 0.4;
const SIZE_CREDIT: f64 = 0.15;
const SIZE_PENALTY: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateScore {
    pub score: f64,
    pub matched: Vec<FeaturePredicate>,
}

impl TemplateScore {
    fn gated(matched: Vec<FeaturePredicate>) -> Self {
        Self {
            score: 0.0,
            matched,
        }
    }

    pub fn fires(&self) -> bool {
        self.score > FIRE_THRESHOLD
    }
}

pub struct ScoringEngine;

impl ScoringEngine {
    pub fn score(ctx: &FeatureContext<'_>, template: &CategoryTemplate) -> f64 {
        Self::evaluate(ctx, template).score
    }

    /// Score one template, keeping the required predicates that matched.
    pub fn evaluate(ctx: &FeatureContext<'_>, template: &CategoryTemplate) -> TemplateScore {
        let mut score = 0.0;
        let mut penalty = 0.0;

        for excluded in template.excluded {
            if excluded.evaluate(ctx) {
                penalty += EXCLUDED_PENALTY;
            }
        }

        let matched: Vec<FeaturePredicate> = template
            .required
            .iter()
            .copied()
            .filter(|p| p.evaluate(ctx))
            .collect();
        score += REQUIRED_CREDIT * matched.len() as f64;
        if matched.len() < template.required.len().div_ceil(2) {
            return TemplateScore::gated(matched);
        }

        let ratio = ctx.basic.aspect_ratio;
        let aspect = template.aspect_ratio;
        if aspect.contains(ratio) {
            score += ASPECT_CREDIT;
        } else {
            let deviation = (ratio - aspect.lo).abs().min((ratio - aspect.hi).abs())
                / aspect.lo.max(aspect.hi);
            if deviation > ASPECT_TOLERANCE {
                penalty += ASPECT_PENALTY;
            }
        }

        score += Self::color_term(ctx.color, template.color_patterns);

        if template.size.contains(ctx.basic.megapixels) {
            score += SIZE_CREDIT;
        } else {
            penalty += SIZE_PENALTY;
        }

        TemplateScore {
            score: (score - penalty).clamp(0.0, 1.0),
            matched,
        }
    }

    /// Sum of per-tag color evidence, capped at 0.4. An image without color
    /// information (unknown dominant color) earns nothing here.
    pub fn color_term(color: &ColorProfile, patterns: &[ColorPattern]) -> f64 {
        use DominantColor::*;

        if !color.dominant_color.is_known() {
            return 0.0;
        }
        let dominant = color.dominant_color;

        let total: f64 = patterns
            .iter()
            .map(|pattern| match pattern {
                ColorPattern::Skin | ColorPattern::Flesh
                    if dominant.is_one_of(&[Pink, Brown, Yellow])
                        && color.brightness != Brightness::Dark =>
                {
                    0.3
                }
                ColorPattern::Metallic
                    if dominant.is_one_of(&[Gray, White, Black])
                        && color.brightness == Brightness::Bright =>
                {
                    0.2
                }
                ColorPattern::FurColors if dominant.is_one_of(&[Brown, Gray, Black, White]) => 0.2,
                ColorPattern::Colorful if color.colorfulness == Level::High => 0.2,
                ColorPattern::HighContrast if color.contrast == Level::High => 0.2,
                ColorPattern::Named(name) if *name == dominant => 0.2,
                _ => 0.0,
            })
            .sum();

        total.min(COLOR_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::catalog::{CATALOG, Category, template};
    use crate::analysis::features::{FeatureVector, TextureType};
    use crate::analysis::predicates::fixtures::{any_basic, any_color, any_features, basic, color};
    use proptest::prelude::*;

    fn wide_geometric() -> FeatureVector {
        FeatureVector {
            has_horizontal_structures: true,
            edge_complexity: 0.2,
            symmetry: 0.3,
            texture_type: TextureType::Uniform,
            ..FeatureVector::default()
        }
    }

    #[test]
    fn oversized_vehicle_loses_size_credit() {
        // 7071x2828: aspect 2.5, 20 MP
        let info = basic(7071, 2828);
        assert_eq!(info.megapixels, 20.0);
        let profile = color(DominantColor::Blue, Brightness::Medium, Level::Low, Level::Low);
        // Symmetry satisfies geometric_shapes; without horizontal structures
        // horizontal_dominant fails, leaving one of two required matches.
        let features = FeatureVector {
            has_horizontal_structures: false,
            symmetry: 0.8,
            ..wide_geometric()
        };
        let ctx = FeatureContext::new(&info, &profile, &features);
        let vehicle = template(Category::Vehicle).expect("vehicle");

        let result = ScoringEngine::evaluate(&ctx, vehicle);
        assert_eq!(result.matched, vec![FeaturePredicate::GeometricShapes]);
        // 0.3 required + 0.25 aspect + 0.0 color - 0.2 size
        assert!((result.score - 0.35).abs() < 1e-9, "got {}", result.score);
        assert!(result.fires());
    }

    #[test]
    fn no_required_matches_gates_to_zero() {
        // Perfect aspect, size and color for food, but neither close_up nor rich_colors.
        let info = basic(4000, 3000);
        let profile = color(DominantColor::Red, Brightness::Dark, Level::High, Level::Low);
        let features = FeatureVector::default();
        let ctx = FeatureContext::new(&info, &profile, &features);
        let food = template(Category::Food).expect("food");
        assert_eq!(ScoringEngine::score(&ctx, food), 0.0);
    }

    #[test]
    fn excluded_features_subtract() {
        let info = basic(2400, 1000);
        let steel = color(DominantColor::Gray, Brightness::Bright, Level::High, Level::Low);
        let features = wide_geometric();
        let ctx = FeatureContext::new(&info, &steel, &features);
        let vehicle = template(Category::Vehicle).expect("vehicle");
        // both required (0.6) + aspect 2.4 (0.25) + metallic (0.2) + size 2.4MP (0.15)
        let score = ScoringEngine::score(&ctx, vehicle);
        assert!((score - 1.0).abs() < 1e-9, "got {score}");

        let animal = template(Category::Animal).expect("animal");
        assert_eq!(ScoringEngine::score(&ctx, animal), 0.0);
    }

    proptest! {
        #[test]
        fn prop_scores_are_bounded_and_repeatable(
            info in any_basic(),
            profile in any_color(),
            features in any_features(),
        ) {
            let ctx = FeatureContext::new(&info, &profile, &features);
            for t in &CATALOG {
                let first = ScoringEngine::score(&ctx, t);
                prop_assert!((0.0..=1.0).contains(&first), "{:?} scored {}", t.category, first);
                prop_assert_eq!(first, ScoringEngine::score(&ctx, t));
            }
        }

        #[test]
        fn prop_unmet_requirements_zero_the_score(
            info in any_basic(),
            profile in any_color(),
            features in any_features(),
        ) {
            let ctx = FeatureContext::new(&info, &profile, &features);
            for t in &CATALOG {
                let held = t.required.iter().filter(|p| p.evaluate(&ctx)).count();
                if held < t.required.len().div_ceil(2) {
                    prop_assert_eq!(ScoringEngine::score(&ctx, t), 0.0);
                }
            }
        }
    }

    #[test]
    fn scores_are_bounded_and_repeatable() {
        let infos = [basic(100, 100), basic(6000, 1000), basic(800, 1200), basic(9000, 9000)];
        let profiles = [
            color(DominantColor::Pink, Brightness::Bright, Level::High, Level::High),
            color(DominantColor::Gray, Brightness::Dark, Level::Low, Level::Low),
            color(DominantColor::Green, Brightness::Medium, Level::Medium, Level::High),
            ColorProfile::default(),
        ];
        let feature_sets = [
            FeatureVector::default(),
            wide_geometric(),
            FeatureVector {
                has_organic_shapes: true,
                has_vertical_structures: true,
                edge_complexity: 0.5,
                color_variation: 0.6,
                symmetry: 0.8,
                texture_type: TextureType::Organic,
                ..FeatureVector::default()
            },
        ];

        for info in &infos {
            for profile in &profiles {
                for features in &feature_sets {
                    let ctx = FeatureContext::new(info, profile, features);
                    for t in &CATALOG {
                        let first = ScoringEngine::score(&ctx, t);
                        assert!((0.0..=1.0).contains(&first));
                        assert_eq!(first, ScoringEngine::score(&ctx, t));
                    }
                }
            }
        }
    }

    #[test]
    fn color_term_is_capped() {
        let skin = color(DominantColor::Pink, Brightness::Bright, Level::High, Level::High);
        let patterns = [
            ColorPattern::Skin,
            ColorPattern::Flesh,
            ColorPattern::Colorful,
        ];
        assert_eq!(ScoringEngine::color_term(&skin, &patterns), COLOR_CAP);
    }

    #[test]
    fn greyscale_earns_no_color_credit() {
        let grey = color(DominantColor::Unknown, Brightness::Bright, Level::High, Level::Low);
        for t in &CATALOG {
            assert_eq!(ScoringEngine::color_term(&grey, t.color_patterns), 0.0);
        }
    }

    #[test]
    fn descriptive_tags_score_nothing() {
        let warm = color(DominantColor::Orange, Brightness::Medium, Level::Medium, Level::Medium);
        let food = template(Category::Food).expect("food");
        assert_eq!(ScoringEngine::color_term(&warm, food.color_patterns), 0.0);
    }
}
