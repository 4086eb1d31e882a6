//! Pipeline stages and their static registry.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{Probability, TypeConstraintError};

/// One discrete phase of the sales pipeline.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Initial,
    Qualified,
    Proposal,
    Negotiation,
    Closed,
}

/// Palette names used to tint stage columns.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StageColor {
    Gray,
    Blue,
    Yellow,
    Orange,
    Green,
}

/// Static description of a stage as shown on the board.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct StageDefinition {
    pub stage: Stage,
    pub label: &'static str,
    pub color: StageColor,
    pub default_probability: Probability,
}

/// Ordered stage registry. Board columns follow this order.
pub static STAGES: [StageDefinition; 5] = [
    StageDefinition {
        stage: Stage::Initial,
        label: "Initial contact",
        color: StageColor::Gray,
        default_probability: Probability::saturating(10),
    },
    StageDefinition {
        stage: Stage::Qualified,
        label: "Qualified",
        color: StageColor::Blue,
        default_probability: Probability::saturating(25),
    },
    StageDefinition {
        stage: Stage::Proposal,
        label: "Proposal",
        color: StageColor::Yellow,
        default_probability: Probability::saturating(50),
    },
    StageDefinition {
        stage: Stage::Negotiation,
        label: "Negotiation",
        color: StageColor::Orange,
        default_probability: Probability::saturating(75),
    },
    StageDefinition {
        stage: Stage::Closed,
        label: "Closed",
        color: StageColor::Green,
        default_probability: Probability::saturating(100),
    },
];

impl Stage {
    /// Zero-based column position of the stage.
    pub const fn position(self) -> usize {
        match self {
            Stage::Initial => 0,
            Stage::Qualified => 1,
            Stage::Proposal => 2,
            Stage::Negotiation => 3,
            Stage::Closed => 4,
        }
    }

    pub fn definition(self) -> &'static StageDefinition {
        &STAGES[self.position()]
    }

    pub fn label(self) -> &'static str {
        self.definition().label
    }

    pub fn color(self) -> StageColor {
        self.definition().color
    }

    /// Probability implied by the stage when the user does not override it.
    pub fn default_probability(self) -> Probability {
        self.definition().default_probability
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Initial => "initial",
            Stage::Qualified => "qualified",
            Stage::Proposal => "proposal",
            Stage::Negotiation => "negotiation",
            Stage::Closed => "closed",
        }
    }

    /// Iterates stages in board order.
    pub fn all() -> impl Iterator<Item = Stage> {
        STAGES.iter().map(|definition| definition.stage)
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initial" => Ok(Stage::Initial),
            "qualified" => Ok(Stage::Qualified),
            "proposal" => Ok(Stage::Proposal),
            "negotiation" => Ok(Stage::Negotiation),
            "closed" => Ok(Stage::Closed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown stage `{other}`"
            ))),
        }
    }
}

impl StageColor {
    pub const fn as_str(self) -> &'static str {
        match self {
            StageColor::Gray => "gray",
            StageColor::Blue => "blue",
            StageColor::Yellow => "yellow",
            StageColor::Orange => "orange",
            StageColor::Green => "green",
        }
    }
}

impl Display for StageColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
