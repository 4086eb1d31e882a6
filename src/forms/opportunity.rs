//! Create/edit form for pipeline opportunities.

use serde::Deserialize;
use validator::Validate;

use crate::domain::opportunity::{NewOpportunity, UpdateOpportunity};
use crate::domain::stage::Stage;
use crate::domain::types::{Amount, ClientId, Probability, SellerId};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OpportunityForm {
    #[validate(range(min = 1))]
    pub client_id: i32,
    #[validate(range(min = 0.0))]
    pub value: f64,
    pub stage: String,
    /// Explicit override; when absent the stage's default probability applies.
    #[validate(range(min = 0, max = 100))]
    pub probability: Option<i32>,
}

/// Typed fields shared by the create and update payloads.
struct ParsedOpportunity {
    client_id: ClientId,
    value: Amount,
    stage: Stage,
    probability: Option<Probability>,
}

impl OpportunityForm {
    fn parse(&self) -> Result<ParsedOpportunity, FormError> {
        self.validate()?;

        Ok(ParsedOpportunity {
            client_id: ClientId::new(self.client_id).map_err(|_| FormError::InvalidClientId)?,
            value: Amount::new(self.value).map_err(|_| FormError::InvalidAmount)?,
            stage: self
                .stage
                .trim()
                .parse()
                .map_err(|_| FormError::InvalidStage)?,
            probability: self
                .probability
                .map(Probability::try_from)
                .transpose()
                .map_err(|_| FormError::InvalidProbability)?,
        })
    }

    pub fn into_new_opportunity(self, seller_id: SellerId) -> Result<NewOpportunity, FormError> {
        let parsed = self.parse()?;
        Ok(NewOpportunity::new(
            parsed.client_id,
            seller_id,
            parsed.value,
            parsed.stage,
            parsed.probability,
        ))
    }

    /// Full edit: every field is written, probability re-derived from the stage if not given.
    pub fn into_update(self) -> Result<UpdateOpportunity, FormError> {
        let parsed = self.parse()?;
        Ok(UpdateOpportunity {
            client_id: Some(parsed.client_id),
            value: Some(parsed.value),
            stage: Some(parsed.stage),
            probability: Some(
                parsed
                    .probability
                    .unwrap_or_else(|| parsed.stage.default_probability()),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> OpportunityForm {
        OpportunityForm {
            client_id: 3,
            value: 1200.0,
            stage: "qualified".to_string(),
            probability: None,
        }
    }

    #[test]
    fn new_opportunity_takes_stage_probability() {
        let payload = form()
            .into_new_opportunity(SellerId::new(8).unwrap())
            .unwrap();

        assert_eq!(payload.stage, Stage::Qualified);
        assert_eq!(payload.probability.get(), 25);
        assert_eq!(payload.seller_id.get(), 8);
    }

    #[test]
    fn explicit_probability_overrides_stage() {
        let update = OpportunityForm {
            probability: Some(90),
            ..form()
        }
        .into_update()
        .unwrap();

        assert_eq!(update.probability.map(Probability::get), Some(90));
        assert_eq!(update.stage, Some(Stage::Qualified));
    }

    #[test]
    fn rejects_negative_value() {
        let result = OpportunityForm {
            value: -1.0,
            ..form()
        }
        .into_update();

        assert!(matches!(result, Err(FormError::Validation(_))));
    }

    #[test]
    fn rejects_probability_over_hundred() {
        let result = OpportunityForm {
            probability: Some(101),
            ..form()
        }
        .into_update();

        assert!(matches!(result, Err(FormError::Validation(_))));
    }

    #[test]
    fn rejects_unknown_stage() {
        let result = OpportunityForm {
            stage: "won".to_string(),
            ..form()
        }
        .into_update();

        assert!(matches!(result, Err(FormError::InvalidStage)));
    }
}
