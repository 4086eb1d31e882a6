//! Pure aggregations over opportunity collections.
//!
//! Every function here is total: an empty slice yields zero/empty results.
//! Callers holding an optional collection pass
//! `opportunities.as_deref().unwrap_or_default()`.

use serde::Serialize;

use crate::domain::opportunity::Opportunity;
use crate::domain::stage::{STAGES, Stage};
use crate::dto::board::{BoardColumn, PipelineSummary};

/// Sum of values of the opportunities currently in `stage`.
pub fn total_for_stage(opportunities: &[Opportunity], stage: Stage) -> f64 {
    opportunities
        .iter()
        .filter(|opportunity| opportunity.stage == stage)
        .map(|opportunity| opportunity.value.get())
        .sum()
}

pub fn pipeline_value(opportunities: &[Opportunity]) -> f64 {
    opportunities
        .iter()
        .map(|opportunity| opportunity.value.get())
        .sum()
}

/// Risk-adjusted forecast: `sum(value * probability / 100)`.
pub fn weighted_pipeline_value(opportunities: &[Opportunity]) -> f64 {
    opportunities.iter().map(Opportunity::weighted_value).sum()
}

/// Mean win probability, `0.0` for an empty collection.
pub fn average_probability(opportunities: &[Opportunity]) -> f64 {
    if opportunities.is_empty() {
        return 0.0;
    }
    let sum: f64 = opportunities
        .iter()
        .map(|opportunity| f64::from(opportunity.probability.get()))
        .sum();
    sum / opportunities.len() as f64
}

pub fn summarize(opportunities: &[Opportunity]) -> PipelineSummary {
    PipelineSummary {
        pipeline_value: pipeline_value(opportunities),
        weighted_value: weighted_pipeline_value(opportunities),
        average_probability: average_probability(opportunities),
    }
}

/// Background/text/border classes used to tint a stage column.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ColorClass {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

const NEUTRAL: ColorClass = ColorClass {
    background: "bg-gray-50",
    text: "text-gray-700",
    border: "border-gray-200",
};

/// Maps a palette name to its class triple. Unknown names get the neutral triple.
pub fn color_class_for(tag: &str) -> ColorClass {
    match tag {
        "blue" => ColorClass {
            background: "bg-blue-50",
            text: "text-blue-700",
            border: "border-blue-200",
        },
        "yellow" => ColorClass {
            background: "bg-yellow-50",
            text: "text-yellow-700",
            border: "border-yellow-200",
        },
        "orange" => ColorClass {
            background: "bg-orange-50",
            text: "text-orange-700",
            border: "border-orange-200",
        },
        "green" => ColorClass {
            background: "bg-green-50",
            text: "text-green-700",
            border: "border-green-200",
        },
        "purple" => ColorClass {
            background: "bg-purple-50",
            text: "text-purple-700",
            border: "border-purple-200",
        },
        "red" => ColorClass {
            background: "bg-red-50",
            text: "text-red-700",
            border: "border-red-200",
        },
        _ => NEUTRAL,
    }
}

/// Severity band of a win probability.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProbabilityBand {
    High,
    MediumHigh,
    Medium,
    Low,
}

impl ProbabilityBand {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProbabilityBand::High => "high",
            ProbabilityBand::MediumHigh => "medium-high",
            ProbabilityBand::Medium => "medium",
            ProbabilityBand::Low => "low",
        }
    }

    pub const fn text_class(self) -> &'static str {
        match self {
            ProbabilityBand::High => "text-green-600",
            ProbabilityBand::MediumHigh => "text-yellow-600",
            ProbabilityBand::Medium => "text-orange-600",
            ProbabilityBand::Low => "text-red-600",
        }
    }
}

/// Lower bounds are inclusive: 80 is high, 79 is medium-high.
pub fn probability_color_for(probability: u8) -> ProbabilityBand {
    match probability {
        80.. => ProbabilityBand::High,
        60..=79 => ProbabilityBand::MediumHigh,
        40..=59 => ProbabilityBand::Medium,
        _ => ProbabilityBand::Low,
    }
}

/// Groups opportunities into registry-ordered columns, preserving input order.
pub fn board_columns(opportunities: &[Opportunity]) -> Vec<BoardColumn> {
    STAGES
        .iter()
        .map(|definition| BoardColumn {
            stage: definition,
            colors: color_class_for(definition.color.as_str()),
            total: total_for_stage(opportunities, definition.stage),
            opportunities: opportunities
                .iter()
                .filter(|opportunity| opportunity.stage == definition.stage)
                .cloned()
                .collect(),
        })
        .collect()
}
