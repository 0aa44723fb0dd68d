// src/analysis/advanced.rs
//! Weighted per-category scorers driven by filter responses and cross-scale
//! metrics. Coarser than the template engine, but they look at evidence the
//! templates cannot see.

use crate::analysis::catalog::Category;
use crate::analysis::color::ColorHistogram;
use crate::analysis::features::{EdgeDirection, EdgeSummary, TextureSummary};
use crate::analysis::multiscale::MultiScaleMetrics;
use crate::models::ImageMetadata;

pub const ADVANCED_CATEGORIES: [Category; 6] = [
    Category::Person,
    Category::Vehicle,
    Category::Building,
    Category::Nature,
    Category::Animal,
    Category::Food,
];

/// Everything the advanced scorers consume. Each summary is optional because
/// each comes from a separate provider call.
#[derive(Debug, Clone)]
pub struct AdvancedFeatures {
    pub width: u32,
    pub height: u32,
    pub color: Option<ColorHistogram>,
    pub texture: Option<TextureSummary>,
    pub edges: Option<EdgeSummary>,
    pub multi_scale: MultiScaleMetrics,
}

impl AdvancedFeatures {
    pub fn new(metadata: &ImageMetadata) -> Self {
        Self {
            width: metadata.width,
            height: metadata.height,
            color: None,
            texture: None,
            edges: None,
            multi_scale: MultiScaleMetrics::default(),
        }
    }

    fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }

    fn megapixels(&self) -> f64 {
        self.width as f64 * self.height as f64 / 1_000_000.0
    }

    fn red_dominance(&self) -> Option<f64> {
        self.color
            .as_ref()
            .and_then(|c| c.distribution)
            .map(|d| d.red_dominance)
    }

    fn texture_energy(&self) -> Option<f64> {
        self.texture.map(|t| t.texture_energy)
    }

    fn edge_direction(&self) -> Option<EdgeDirection> {
        self.edges.map(|e| e.edge_direction)
    }

    fn complexity(&self) -> Option<f64> {
        self.color.as_ref().map(|c| c.complexity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvancedScore {
    pub score: f64,
    pub evidence: Vec<&'static str>,
}

#[derive(Default)]
struct Tally {
    score: f64,
    evidence: Vec<&'static str>,
}

impl Tally {
    fn add(&mut self, holds: bool, weight: f64, label: &'static str) {
        if holds {
            self.score += weight;
            self.evidence.push(label);
        }
    }

    fn finish(self) -> AdvancedScore {
        AdvancedScore {
            score: self.score.min(1.0),
            evidence: self.evidence,
        }
    }
}

fn within(value: Option<f64>, lo: f64, hi: f64) -> bool {
    value.is_some_and(|v| v > lo && v < hi)
}

fn above(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v > threshold)
}

fn below(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v < threshold)
}

/// Score one category; `None` for categories the advanced pass does not cover.
pub fn score_category(category: Category, f: &AdvancedFeatures) -> Option<AdvancedScore> {
    let score = match category {
        Category::Person => person(f),
        Category::Vehicle => vehicle(f),
        Category::Building => building(f),
        Category::Nature => nature(f),
        Category::Animal => animal(f),
        Category::Food => food(f),
        Category::Text => return None,
    };
    Some(score)
}

fn person(f: &AdvancedFeatures) -> AdvancedScore {
    let mut t = Tally::default();
    t.add(within(f.red_dominance(), 0.3, 0.6), 0.3, "skin-tone balance");
    t.add(within(Some(f.aspect_ratio()), 0.6, 1.0), 0.25, "portrait framing");
    t.add(within(f.texture_energy(), 20.0, 80.0), 0.2, "moderate texture energy");
    t.add(
        within(f.edges.map(|e| e.edge_strength), 30.0, 100.0),
        0.15,
        "moderate edge strength",
    );
    t.add(
        f.multi_scale.resolved() > 0 && f.multi_scale.consistency > 0.6,
        0.1,
        "consistent across scales",
    );
    t.finish()
}

fn vehicle(f: &AdvancedFeatures) -> AdvancedScore {
    let mut t = Tally::default();
    t.add(within(Some(f.aspect_ratio()), 1.5, 3.5), 0.3, "wide geometric framing");
    t.add(
        below(
            f.color
                .as_ref()
                .and_then(|c| c.distribution)
                .map(|d| d.color_balance),
            50.0,
        ),
        0.25,
        "restrained palette",
    );
    t.add(above(f.edges.map(|e| e.edge_density), 0.3), 0.2, "dense edges");
    t.add(
        above(f.texture.map(|s| s.directional_variance), 40.0),
        0.15,
        "strong directional gradients",
    );
    t.add(below(f.complexity(), 40.0), 0.1, "simple coloring");
    t.finish()
}

fn building(f: &AdvancedFeatures) -> AdvancedScore {
    let mut t = Tally::default();
    t.add(f.aspect_ratio() < 1.5, 0.2, "upright framing");
    t.add(above(f.edges.map(|e| e.edge_strength), 50.0), 0.25, "regular strong edges");
    t.add(
        above(f.texture.map(|s| s.directional_variance), 60.0),
        0.2,
        "pronounced directional texture",
    );
    t.add(
        above(f.multi_scale.largest().map(|s| s.variance), 1000.0),
        0.2,
        "detail at large scale",
    );
    t.add(below(f.complexity(), 35.0), 0.15, "muted palette");
    t.finish()
}

fn nature(f: &AdvancedFeatures) -> AdvancedScore {
    let mut t = Tally::default();
    t.add(
        above(
            f.color
                .as_ref()
                .and_then(|c| c.distribution)
                .map(|d| d.green_dominance),
            0.4,
        ),
        0.3,
        "green dominance",
    );
    t.add(above(f.texture_energy(), 50.0), 0.25, "rich texture");
    t.add(above(f.complexity(), 45.0), 0.2, "varied coloring");
    t.add(
        f.edge_direction() == Some(EdgeDirection::Medium),
        0.15,
        "irregular edges",
    );
    t.add(
        f.multi_scale.resolved() > 0 && f.multi_scale.texture_variation > 0.5,
        0.1,
        "texture shifts across scales",
    );
    t.finish()
}

fn animal(f: &AdvancedFeatures) -> AdvancedScore {
    let mut t = Tally::default();
    t.add(within(f.red_dominance(), 0.25, 0.5), 0.25, "fur-tone balance");
    t.add(within(f.texture_energy(), 30.0, 70.0), 0.25, "organic texture");
    t.add(within(Some(f.megapixels()), 0.5, 8.0), 0.2, "mid-scale subject");
    t.add(
        f.edge_direction() == Some(EdgeDirection::Medium),
        0.15,
        "irregular edges",
    );
    t.add(
        above(f.color.as_ref().map(|c| c.colorfulness), 30.0),
        0.15,
        "color variation",
    );
    t.finish()
}

fn food(f: &AdvancedFeatures) -> AdvancedScore {
    let mut t = Tally::default();
    let warm = f.color.as_ref().and_then(|c| c.distribution).is_some_and(|d| {
        d.red_dominance > 0.3 || d.red_dominance + d.green_dominance > 0.6
    });
    t.add(warm, 0.3, "warm tones");
    t.add(f.megapixels() < 3.0, 0.25, "close-up framing");
    t.add(
        above(f.color.as_ref().map(|c| c.colorfulness), 40.0),
        0.2,
        "vivid colors",
    );
    t.add(within(f.texture_energy(), 25.0, 60.0), 0.15, "fine texture detail");
    t.add(
        f.edge_direction() == Some(EdgeDirection::Weak),
        0.1,
        "soft edges",
    );
    t.finish()
}
