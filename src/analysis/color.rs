// src/analysis/color.rs
use serde::{Deserialize, Serialize};

use crate::models::ChannelStats;

const DOMINANCE_MARGIN: f64 = 50.0;
const SECONDARY_MEAN: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Brown,
    Gray,
    Black,
    White,
    Unknown,
}

impl DominantColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            DominantColor::Red => "red",
            DominantColor::Orange => "orange",
            DominantColor::Yellow => "yellow",
            DominantColor::Green => "green",
            DominantColor::Blue => "blue",
            DominantColor::Purple => "purple",
            DominantColor::Pink => "pink",
            DominantColor::Brown => "brown",
            DominantColor::Gray => "gray",
            DominantColor::Black => "black",
            DominantColor::White => "white",
            DominantColor::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != DominantColor::Unknown
    }

    pub fn is_one_of(&self, colors: &[DominantColor]) -> bool {
        colors.contains(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brightness {
    Dark,
    Medium,
    Bright,
}

impl Brightness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Brightness::Dark => "dark",
            Brightness::Medium => "medium",
            Brightness::Bright => "bright",
        }
    }
}

/// Three-way bucket shared by contrast and colorfulness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }

    fn bucket(value: f64, low_below: f64, high_above: f64) -> Self {
        if value < low_below {
            Level::Low
        } else if value > high_above {
            Level::High
        } else {
            Level::Medium
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorProfile {
    pub dominant_color: DominantColor,
    pub brightness: Brightness,
    pub contrast: Level,
    pub colorfulness: Level,
}

impl Default for ColorProfile {
    fn default() -> Self {
        Self {
            dominant_color: DominantColor::Unknown,
            brightness: Brightness::Medium,
            contrast: Level::Medium,
            colorfulness: Level::Low,
        }
    }
}

/// Buckets whole-image channel statistics into a [`ColorProfile`].
///
/// Every classifier is total: missing or malformed statistics produce the
/// per-field fallback of [`ColorProfile::default`].
pub struct ColorProfiler;

impl ColorProfiler {
    pub fn profile(stats: Option<&ChannelStats>) -> ColorProfile {
        match stats.filter(|s| s.is_valid()) {
            Some(stats) => ColorProfile {
                dominant_color: Self::dominant_color(stats),
                brightness: Self::brightness(stats),
                contrast: Self::contrast(stats),
                colorfulness: Self::colorfulness(stats),
            },
            None => ColorProfile::default(),
        }
    }

    pub fn dominant_color(stats: &ChannelStats) -> DominantColor {
        let Some((r, g, b)) = stats.rgb() else {
            return DominantColor::Unknown;
        };
        let (r, g, b) = (r.mean, g.mean, b.mean);

        if r > g && r > b {
            if r - g.max(b) > DOMINANCE_MARGIN {
                DominantColor::Red
            } else if g > SECONDARY_MEAN {
                DominantColor::Orange
            } else {
                DominantColor::Pink
            }
        } else if g > r && g > b {
            if g - r.max(b) <= DOMINANCE_MARGIN && r > SECONDARY_MEAN {
                DominantColor::Yellow
            } else {
                DominantColor::Green
            }
        } else if b > r && b > g {
            if b - r.max(g) <= DOMINANCE_MARGIN && r > SECONDARY_MEAN {
                DominantColor::Purple
            } else {
                DominantColor::Blue
            }
        } else {
            let avg = (r + g + b) / 3.0;
            if avg < 50.0 {
                DominantColor::Black
            } else if avg > 200.0 {
                DominantColor::White
            } else {
                DominantColor::Gray
            }
        }
    }

    pub fn brightness(stats: &ChannelStats) -> Brightness {
        match stats.mean_of_means() {
            Some(avg) if avg < 85.0 => Brightness::Dark,
            Some(avg) if avg > 170.0 => Brightness::Bright,
            _ => Brightness::Medium,
        }
    }

    pub fn contrast(stats: &ChannelStats) -> Level {
        stats
            .mean_stdev()
            .map_or(Level::Medium, |sd| Level::bucket(sd, 30.0, 60.0))
    }

    pub fn colorfulness(stats: &ChannelStats) -> Level {
        let Some((r, g, b)) = stats.rgb() else {
            return Level::Low;
        };
        let norm = (r.stdev.powi(2) + g.stdev.powi(2) + b.stdev.powi(2)).sqrt();
        Level::bucket(norm, 20.0, 50.0)
    }
}

/// Channel balance figures used by the advanced category scorers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorDistribution {
    pub red_dominance: f64,
    pub green_dominance: f64,
    pub blue_dominance: f64,
    pub color_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorHistogram {
    pub distribution: Option<ColorDistribution>,
    /// Mean per-channel standard deviation.
    pub complexity: f64,
    pub dominant_channels: Vec<DominantColor>,
    /// Opponent-channel colorfulness, sqrt(rg^2 + yb^2).
    pub colorfulness: f64,
}

impl ColorHistogram {
    pub fn from_stats(stats: &ChannelStats) -> Option<Self> {
        if !stats.is_valid() {
            return None;
        }
        let complexity = stats.mean_stdev().unwrap_or(0.0);

        let Some((r, g, b)) = stats.rgb() else {
            return Some(Self {
                distribution: None,
                complexity,
                dominant_channels: Vec::new(),
                colorfulness: 0.0,
            });
        };
        let (r, g, b) = (r.mean, g.mean, b.mean);

        let total = r + g + b;
        let distribution = (total > 0.0).then(|| ColorDistribution {
            red_dominance: r / total,
            green_dominance: g / total,
            blue_dominance: b / total,
            color_balance: (r - g).abs() + (g - b).abs() + (b - r).abs(),
        });

        let mut dominant_channels = Vec::new();
        if r > g && r > b {
            dominant_channels.push(DominantColor::Red);
        }
        if g > r && g > b {
            dominant_channels.push(DominantColor::Green);
        }
        if b > r && b > g {
            dominant_channels.push(DominantColor::Blue);
        }

        let rg = r - g;
        let yb = (r + g) / 2.0 - b;

        Some(Self {
            distribution,
            complexity,
            dominant_channels,
            colorfulness: (rg * rg + yb * yb).sqrt(),
        })
    }
}
