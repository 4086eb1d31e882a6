//! Diesel models for pipeline opportunities.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::opportunity::{
    NewOpportunity as DomainNewOpportunity, Opportunity as DomainOpportunity,
    UpdateOpportunity as DomainUpdateOpportunity,
};
use crate::domain::types::{
    Amount, ClientId, OpportunityId, Probability, SellerId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::opportunities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Opportunity {
    pub id: i32,
    pub client_id: i32,
    pub seller_id: i32,
    pub value: f64,
    pub stage: String,
    pub probability: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::opportunities)]
pub struct NewOpportunity {
    pub client_id: i32,
    pub seller_id: i32,
    pub value: f64,
    pub stage: &'static str,
    pub probability: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::opportunities)]
/// Changeset for partial updates. `updated_at` is always bumped.
pub struct UpdateOpportunity {
    pub client_id: Option<i32>,
    pub value: Option<f64>,
    pub stage: Option<&'static str>,
    pub probability: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Opportunity> for DomainOpportunity {
    type Error = TypeConstraintError;

    fn try_from(row: Opportunity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OpportunityId::new(row.id)?,
            client_id: ClientId::new(row.client_id)?,
            seller_id: SellerId::new(row.seller_id)?,
            value: Amount::new(row.value)?,
            stage: row.stage.parse()?,
            probability: Probability::try_from(row.probability)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<&DomainNewOpportunity> for NewOpportunity {
    fn from(payload: &DomainNewOpportunity) -> Self {
        Self {
            client_id: payload.client_id.get(),
            seller_id: payload.seller_id.get(),
            value: payload.value.get(),
            stage: payload.stage.as_str(),
            probability: payload.probability.into(),
        }
    }
}

impl UpdateOpportunity {
    pub fn new(updates: &DomainUpdateOpportunity, updated_at: NaiveDateTime) -> Self {
        Self {
            client_id: updates.client_id.map(i32::from),
            value: updates.value.map(Amount::get),
            stage: updates.stage.map(|stage| stage.as_str()),
            probability: updates.probability.map(i32::from),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::stage::Stage;

    fn row(stage: &str, probability: i32) -> Opportunity {
        let now = Utc::now().naive_utc();
        Opportunity {
            id: 1,
            client_id: 2,
            seller_id: 3,
            value: 2500.0,
            stage: stage.to_string(),
            probability,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_into_domain() {
        let domain = DomainOpportunity::try_from(row("proposal", 50)).unwrap();
        assert_eq!(domain.stage, Stage::Proposal);
        assert_eq!(domain.probability.get(), 50);
        assert_eq!(domain.value.get(), 2500.0);
    }

    #[test]
    fn row_with_unknown_stage_is_rejected() {
        assert!(DomainOpportunity::try_from(row("won", 50)).is_err());
        assert_eq!(
            DomainOpportunity::try_from(row("closed", 120)),
            Err(TypeConstraintError::ProbabilityOutOfRange)
        );
    }

    #[test]
    fn stage_only_changeset_leaves_other_columns_untouched() {
        let now = Utc::now().naive_utc();
        let changes = UpdateOpportunity::new(&DomainUpdateOpportunity::stage(Stage::Closed), now);
        assert_eq!(changes.stage, Some("closed"));
        assert!(changes.value.is_none());
        assert!(changes.probability.is_none());
        assert!(changes.client_id.is_none());
    }
}
