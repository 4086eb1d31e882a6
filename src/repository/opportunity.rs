use chrono::Utc;
use diesel::prelude::*;

use crate::domain::opportunity::{NewOpportunity, Opportunity, UpdateOpportunity};
use crate::domain::types::OpportunityId;
use crate::models::opportunity::{
    NewOpportunity as DbNewOpportunity, Opportunity as DbOpportunity,
    UpdateOpportunity as DbUpdateOpportunity,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, OpportunityReader, OpportunityWriter};

impl OpportunityReader for DieselRepository {
    fn list_opportunities(&self) -> RepositoryResult<Vec<Opportunity>> {
        use crate::schema::opportunities;

        let mut conn = self.conn()?;
        let rows = opportunities::table
            .order(opportunities::created_at.desc())
            .then_order_by(opportunities::id.desc())
            .select(DbOpportunity::as_select())
            .load::<DbOpportunity>(&mut conn)?;

        rows.into_iter()
            .map(|row| Opportunity::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn get_opportunity_by_id(&self, id: OpportunityId) -> RepositoryResult<Option<Opportunity>> {
        use crate::schema::opportunities;

        let mut conn = self.conn()?;
        let row = opportunities::table
            .find(id.get())
            .select(DbOpportunity::as_select())
            .first::<DbOpportunity>(&mut conn)
            .optional()?;

        row.map(Opportunity::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl OpportunityWriter for DieselRepository {
    fn create_opportunity(
        &self,
        new_opportunity: &NewOpportunity,
    ) -> RepositoryResult<Opportunity> {
        use crate::schema::opportunities;

        let mut conn = self.conn()?;
        let insertable = DbNewOpportunity::from(new_opportunity);
        let row = diesel::insert_into(opportunities::table)
            .values(&insertable)
            .returning(DbOpportunity::as_returning())
            .get_result::<DbOpportunity>(&mut conn)?;

        Opportunity::try_from(row).map_err(RepositoryError::from)
    }

    fn update_opportunity(
        &self,
        id: OpportunityId,
        updates: &UpdateOpportunity,
    ) -> RepositoryResult<Opportunity> {
        use crate::schema::opportunities;

        let mut conn = self.conn()?;
        let changes = DbUpdateOpportunity::new(updates, Utc::now().naive_utc());
        let row = diesel::update(opportunities::table.find(id.get()))
            .set(&changes)
            .returning(DbOpportunity::as_returning())
            .get_result::<DbOpportunity>(&mut conn)?;

        Opportunity::try_from(row).map_err(RepositoryError::from)
    }
}
