//! Data access for opportunities, tickets and clients.
//!
//! Services depend on the reader/writer traits only; [`DieselRepository`]
//! implements them on top of a SQLite pool.

use crate::db::{DbConnection, DbPool};
use crate::domain::client::Client;
use crate::domain::opportunity::{NewOpportunity, Opportunity, UpdateOpportunity};
use crate::domain::ticket::{NewTicket, Ticket, UpdateTicket};
use crate::domain::types::{OpportunityId, TicketId};
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod opportunity;
pub mod ticket;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

pub trait OpportunityReader {
    fn list_opportunities(&self) -> RepositoryResult<Vec<Opportunity>>;
    fn get_opportunity_by_id(&self, id: OpportunityId) -> RepositoryResult<Option<Opportunity>>;
}

pub trait OpportunityWriter {
    fn create_opportunity(&self, new_opportunity: &NewOpportunity)
    -> RepositoryResult<Opportunity>;
    fn update_opportunity(
        &self,
        id: OpportunityId,
        updates: &UpdateOpportunity,
    ) -> RepositoryResult<Opportunity>;
}

pub trait ClientReader {
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

pub trait TicketReader {
    fn list_tickets(&self) -> RepositoryResult<Vec<Ticket>>;
}

pub trait TicketWriter {
    fn create_ticket(&self, new_ticket: &NewTicket) -> RepositoryResult<Ticket>;
    fn update_ticket(&self, id: TicketId, updates: &UpdateTicket) -> RepositoryResult<Ticket>;
}
