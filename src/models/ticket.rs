//! Diesel models for support tickets.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::ticket::{
    NewTicket as DomainNewTicket, Ticket as DomainTicket, UpdateTicket as DomainUpdateTicket,
};
use crate::domain::types::{
    ClientId, SellerId, TicketDescription, TicketId, TicketTitle, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tickets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Ticket {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub client_id: i32,
    pub seller_id: i32,
    pub status: String,
    pub priority: String,
    pub category: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tickets)]
pub struct NewTicket<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub client_id: i32,
    pub seller_id: i32,
    pub status: &'static str,
    pub priority: &'static str,
    pub category: &'static str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tickets)]
pub struct UpdateTicket<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub client_id: Option<i32>,
    pub status: Option<&'static str>,
    pub priority: Option<&'static str>,
    pub category: Option<&'static str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Ticket> for DomainTicket {
    type Error = TypeConstraintError;

    fn try_from(row: Ticket) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TicketId::new(row.id)?,
            title: TicketTitle::new(row.title)?,
            description: TicketDescription::new(row.description),
            client_id: ClientId::new(row.client_id)?,
            seller_id: SellerId::new(row.seller_id)?,
            status: row.status.parse()?,
            priority: row.priority.parse()?,
            category: row.category.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewTicket> for NewTicket<'a> {
    fn from(ticket: &'a DomainNewTicket) -> Self {
        Self {
            title: ticket.title.as_str(),
            description: ticket.description.as_str(),
            client_id: ticket.client_id.get(),
            seller_id: ticket.seller_id.get(),
            status: ticket.status.as_str(),
            priority: ticket.priority.as_str(),
            category: ticket.category.as_str(),
        }
    }
}

impl<'a> UpdateTicket<'a> {
    pub fn new(updates: &'a DomainUpdateTicket, updated_at: NaiveDateTime) -> Self {
        Self {
            title: updates.title.as_ref().map(|title| title.as_str()),
            description: updates.description.as_ref().map(|d| d.as_str()),
            client_id: updates.client_id.map(i32::from),
            status: updates.status.map(|status| status.as_str()),
            priority: updates.priority.map(|priority| priority.as_str()),
            category: updates.category.map(|category| category.as_str()),
            updated_at,
        }
    }
}
