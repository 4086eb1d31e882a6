//! DTOs shaped for the ticket list.

use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::ticket::Ticket;

/// Query parameters accepted by the ticket list.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TicketListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
}

/// Summary counters over a ticket list.
#[derive(Debug, Default, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
    pub urgent: usize,
}

/// Data required to render the ticket list.
#[derive(Debug)]
pub struct TicketsPageData {
    pub tickets: Vec<Ticket>,
    pub clients: Vec<Client>,
    pub stats: TicketStats,
    pub search_query: Option<String>,
}
