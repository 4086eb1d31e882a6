use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::stage::Stage;
use crate::domain::types::{Amount, ClientId, OpportunityId, Probability, SellerId};

/// A prospective sale tracked through the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub client_id: ClientId,
    pub seller_id: SellerId,
    pub value: Amount,
    pub stage: Stage,
    pub probability: Probability,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Opportunity {
    /// Returns a copy placed in `stage`, leaving every other field untouched.
    #[must_use]
    pub fn with_stage(&self, stage: Stage) -> Self {
        Self {
            stage,
            ..self.clone()
        }
    }

    /// Risk-adjusted value of this single opportunity.
    pub fn weighted_value(&self) -> f64 {
        self.value.get() * f64::from(self.probability.get()) / 100.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewOpportunity {
    pub client_id: ClientId,
    pub seller_id: SellerId,
    pub value: Amount,
    pub stage: Stage,
    pub probability: Probability,
}

impl NewOpportunity {
    /// Builds a payload, deriving the probability from the stage unless overridden.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        seller_id: SellerId,
        value: Amount,
        stage: Stage,
        probability: Option<Probability>,
    ) -> Self {
        Self {
            client_id,
            seller_id,
            value,
            stage,
            probability: probability.unwrap_or_else(|| stage.default_probability()),
        }
    }
}

/// Partial update; `None` fields are left unchanged by the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateOpportunity {
    pub client_id: Option<ClientId>,
    pub value: Option<Amount>,
    pub stage: Option<Stage>,
    pub probability: Option<Probability>,
}

impl UpdateOpportunity {
    /// Stage-only change issued by the board after a drag.
    #[must_use]
    pub fn stage(stage: Stage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.client_id.is_none()
            && self.value.is_none()
            && self.stage.is_none()
            && self.probability.is_none()
    }
}
