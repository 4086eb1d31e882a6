use chrono::Utc;
use diesel::prelude::*;

use crate::domain::ticket::{NewTicket, Ticket, UpdateTicket};
use crate::domain::types::TicketId;
use crate::models::ticket::{
    NewTicket as DbNewTicket, Ticket as DbTicket, UpdateTicket as DbUpdateTicket,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TicketReader, TicketWriter};

impl TicketReader for DieselRepository {
    fn list_tickets(&self) -> RepositoryResult<Vec<Ticket>> {
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        let rows = tickets::table
            .order(tickets::created_at.desc())
            .then_order_by(tickets::id.desc())
            .select(DbTicket::as_select())
            .load::<DbTicket>(&mut conn)?;

        rows.into_iter()
            .map(|row| Ticket::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl TicketWriter for DieselRepository {
    fn create_ticket(&self, new_ticket: &NewTicket) -> RepositoryResult<Ticket> {
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(tickets::table)
            .values(&DbNewTicket::from(new_ticket))
            .returning(DbTicket::as_returning())
            .get_result::<DbTicket>(&mut conn)?;

        Ticket::try_from(row).map_err(RepositoryError::from)
    }

    fn update_ticket(&self, id: TicketId, updates: &UpdateTicket) -> RepositoryResult<Ticket> {
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        let changes = DbUpdateTicket::new(updates, Utc::now().naive_utc());
        let row = diesel::update(tickets::table.find(id.get()))
            .set(&changes)
            .returning(DbTicket::as_returning())
            .get_result::<DbTicket>(&mut conn)?;

        Ticket::try_from(row).map_err(RepositoryError::from)
    }
}
