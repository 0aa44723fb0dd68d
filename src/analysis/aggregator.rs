// src/analysis/aggregator.rs
use crate::analysis::advanced::{ADVANCED_CATEGORIES, AdvancedFeatures, score_category};
use crate::analysis::catalog::CategoryTemplate;
use crate::analysis::predicates::FeatureContext;
use crate::analysis::scoring::{ADVANCED_ELIGIBLE, ScoringEngine};
use crate::models::{
    AdvancedSummary, ConfidenceSummary, DetectionCandidate, DetectionResult, Provenance,
};

/// Template evidence counts for less than advanced evidence.
const TRADITIONAL_WEIGHT: f64 = 0.8;
const TRADITIONAL_CAP: f64 = 0.9;
const PRIMARY_OBJECTS: usize = 3;

const HIGH_CONFIDENCE: f64 = 0.7;
const MEDIUM_CONFIDENCE: f64 = 0.5;

pub struct DetectionAggregator;

impl DetectionAggregator {
    /// Advanced pass: keep categories scoring above 0.5.
    pub fn advanced_pass(features: &AdvancedFeatures) -> Vec<DetectionCandidate> {
        ADVANCED_CATEGORIES
            .iter()
            .filter_map(|&category| {
                let result = score_category(category, features)?;
                (result.score > ADVANCED_ELIGIBLE).then(|| DetectionCandidate {
                    category,
                    score: result.score,
                    matched_features: result.evidence.iter().map(|s| s.to_string()).collect(),
                    provenance: Provenance::Advanced,
                })
            })
            .collect()
    }

    /// Traditional pass: every template that fires, rescaled to min(0.8 x score, 0.9).
    pub fn traditional_pass(
        ctx: &FeatureContext<'_>,
        catalog: &[CategoryTemplate],
    ) -> Vec<DetectionCandidate> {
        catalog
            .iter()
            .filter_map(|template| {
                let result = ScoringEngine::evaluate(ctx, template);
                result.fires().then(|| DetectionCandidate {
                    category: template.category,
                    score: (result.score * TRADITIONAL_WEIGHT).min(TRADITIONAL_CAP),
                    matched_features: result
                        .matched
                        .iter()
                        .map(|p| p.name().to_string())
                        .collect(),
                    provenance: Provenance::Traditional,
                })
            })
            .collect()
    }

    /// Combine both passes. `None` means the pass could not run; when neither
    /// ran the result is empty.
    pub fn merge(
        advanced: Option<Vec<DetectionCandidate>>,
        traditional: Option<Vec<DetectionCandidate>>,
    ) -> DetectionResult {
        let mut candidates: Vec<DetectionCandidate> = advanced.unwrap_or_default();
        let advanced_summary = Self::advanced_summary(&candidates);

        for candidate in traditional.unwrap_or_default() {
            if candidates.iter().all(|c| c.category != candidate.category) {
                candidates.push(candidate);
            }
        }

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        DetectionResult {
            primary: candidates.first().map(|c| c.category),
            primary_objects: candidates
                .iter()
                .take(PRIMARY_OBJECTS)
                .map(|c| c.category)
                .collect(),
            summary: Self::summarize(&candidates),
            advanced: advanced_summary,
            candidates,
        }
    }

    pub fn summarize(candidates: &[DetectionCandidate]) -> ConfidenceSummary {
        if candidates.is_empty() {
            return ConfidenceSummary::default();
        }
        let scores = candidates.iter().map(|c| c.score);
        let mut summary = ConfidenceSummary {
            max: scores.clone().fold(0.0, f64::max),
            average: scores.clone().sum::<f64>() / candidates.len() as f64,
            ..ConfidenceSummary::default()
        };
        for score in scores {
            if score > HIGH_CONFIDENCE {
                summary.high += 1;
            } else if score >= MEDIUM_CONFIDENCE {
                summary.medium += 1;
            } else {
                summary.low += 1;
            }
        }
        summary
    }

    fn advanced_summary(candidates: &[DetectionCandidate]) -> Option<AdvancedSummary> {
        if candidates.is_empty() {
            return None;
        }
        let summary = Self::summarize(candidates);
        Some(AdvancedSummary {
            total_detections: candidates.len(),
            max_confidence: summary.max,
            avg_confidence: summary.average,
        })
    }
}
