//! Confidence banding shared by the renderer and the response envelope.

use colored::Color;
use serde::Serialize;
use std::fmt;

/// Named band for a confidence score in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceLevel {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Medium,
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::VeryHigh
        } else if score >= 0.8 {
            Self::High
        } else if score >= 0.6 {
            Self::Medium
        } else if score >= 0.4 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display emphasis for a confidence score. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Strong,
    Neutral,
    Caution,
    Alarm,
}

impl Emphasis {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Strong
        } else if score >= 0.6 {
            Self::Neutral
        } else if score >= 0.4 {
            Self::Caution
        } else {
            Self::Alarm
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Strong => Color::BrightGreen,
            Self::Neutral => Color::BrightCyan,
            Self::Caution => Color::BrightYellow,
            Self::Alarm => Color::BrightRed,
        }
    }
}

/// Whole-number percentage used wherever a unit score is displayed
pub fn percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}
