//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::Client;
use crate::domain::opportunity::{NewOpportunity, Opportunity, UpdateOpportunity};
use crate::domain::ticket::{NewTicket, Ticket, UpdateTicket};
use crate::domain::types::{OpportunityId, TicketId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientReader, OpportunityReader, OpportunityWriter, TicketReader, TicketWriter,
};

mock! {
    pub Repository {}

    impl OpportunityReader for Repository {
        fn list_opportunities(&self) -> RepositoryResult<Vec<Opportunity>>;
        fn get_opportunity_by_id(
            &self,
            id: OpportunityId,
        ) -> RepositoryResult<Option<Opportunity>>;
    }

    impl OpportunityWriter for Repository {
        fn create_opportunity(
            &self,
            new_opportunity: &NewOpportunity,
        ) -> RepositoryResult<Opportunity>;
        fn update_opportunity(
            &self,
            id: OpportunityId,
            updates: &UpdateOpportunity,
        ) -> RepositoryResult<Opportunity>;
    }

    impl ClientReader for Repository {
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl TicketReader for Repository {
        fn list_tickets(&self) -> RepositoryResult<Vec<Ticket>>;
    }

    impl TicketWriter for Repository {
        fn create_ticket(&self, new_ticket: &NewTicket) -> RepositoryResult<Ticket>;
        fn update_ticket(&self, id: TicketId, updates: &UpdateTicket) -> RepositoryResult<Ticket>;
    }
}
