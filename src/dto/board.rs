//! DTOs shaped for the pipeline board.

use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::opportunity::Opportunity;
use crate::domain::stage::StageDefinition;
use crate::services::pipeline::ColorClass;

/// One board column: a stage, its cards and the money sitting in it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BoardColumn {
    pub stage: &'static StageDefinition,
    pub colors: ColorClass,
    pub total: f64,
    pub opportunities: Vec<Opportunity>,
}

/// Headline figures shown above the board.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PipelineSummary {
    pub pipeline_value: f64,
    pub weighted_value: f64,
    pub average_probability: f64,
}

/// Everything the board page needs from the store.
#[derive(Debug)]
pub struct BoardPageData {
    pub opportunities: Vec<Opportunity>,
    pub clients: Vec<Client>,
    pub columns: Vec<BoardColumn>,
    pub summary: PipelineSummary,
}
