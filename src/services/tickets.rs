//! Ticket list filtering, summary counters and ticket mutations.

use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::client::Client;
use crate::domain::ticket::{Ticket, TicketPriority, TicketStatus};
use crate::domain::types::{ClientId, TicketId};
use crate::domain::user::AuthenticatedUser;
use crate::dto::tickets::{TicketListQuery, TicketStats, TicketsPageData};
use crate::forms::ticket::TicketForm;
use crate::repository::{ClientReader, TicketReader, TicketWriter};
use crate::services::notify::{Notifier, report_outcome};
use crate::services::session::require_actor;
use crate::services::{ServiceError, ServiceResult};

/// Either every value passes, or only one specific value does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    /// `all`, the Spanish `todos`/`todas` and an empty string mean "no filter".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" | "todos" | "todas" => Ok(Filter::All),
            other => other.parse().map(Filter::Only),
        }
    }
}

/// Criteria for [`filter_tickets`]; all of them must hold.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub status: Filter<TicketStatus>,
    pub priority: Filter<TicketPriority>,
    pub search: String,
}

impl TicketFilter {
    /// Parses raw query values. Unknown status/priority values fall back to `All`.
    pub fn from_query(query: &TicketListQuery) -> Self {
        fn parse<T: FromStr>(raw: Option<&str>, field: &str) -> Filter<T> {
            raw.map_or(Filter::All, |raw| {
                raw.parse().unwrap_or_else(|_| {
                    log::debug!("Ignoring unknown {field} filter `{raw}`");
                    Filter::All
                })
            })
        }

        Self {
            status: parse(query.status.as_deref(), "status"),
            priority: parse(query.priority.as_deref(), "priority"),
            search: query.search.clone().unwrap_or_default(),
        }
    }
}

/// Client lookup by id used by the search predicate.
pub struct ClientDirectory<'a> {
    by_id: HashMap<ClientId, &'a Client>,
}

impl<'a> ClientDirectory<'a> {
    pub fn new(clients: &'a [Client]) -> Self {
        Self {
            by_id: clients.iter().map(|client| (client.id, client)).collect(),
        }
    }

    pub fn get(&self, id: ClientId) -> Option<&'a Client> {
        self.by_id.get(&id).copied()
    }
}

fn contains_needle(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn matches_search(ticket: &Ticket, needle: &str, clients: &ClientDirectory<'_>) -> bool {
    if contains_needle(ticket.title.as_str(), needle)
        || contains_needle(&ticket.description.plain_text(), needle)
    {
        return true;
    }
    clients.get(ticket.client_id).is_some_and(|client| {
        contains_needle(client.company_name.as_str(), needle)
            || client
                .contact_name
                .as_deref()
                .is_some_and(|contact| contains_needle(contact, needle))
    })
}

/// Returns the tickets matching status, priority and search text, in input order.
///
/// Search is case-insensitive over title, description, client company and
/// client contact name. Descriptions are matched on their visible text, not
/// on the sanitized markup. Blank search text matches everything.
pub fn filter_tickets<'a>(
    tickets: &'a [Ticket],
    filter: &TicketFilter,
    clients: &ClientDirectory<'_>,
) -> Vec<&'a Ticket> {
    let needle = filter.search.trim().to_lowercase();

    tickets
        .iter()
        .filter(|ticket| filter.status.matches(&ticket.status))
        .filter(|ticket| filter.priority.matches(&ticket.priority))
        .filter(|ticket| needle.is_empty() || matches_search(ticket, &needle, clients))
        .collect()
}

pub fn ticket_stats<'a, I>(tickets: I) -> TicketStats
where
    I: IntoIterator<Item = &'a Ticket>,
{
    tickets
        .into_iter()
        .fold(TicketStats::default(), |mut stats, ticket| {
            stats.total += 1;
            match ticket.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::Resolved => stats.resolved += 1,
                TicketStatus::InProgress | TicketStatus::Closed => {}
            }
            if ticket.priority == TicketPriority::Urgent {
                stats.urgent += 1;
            }
            stats
        })
}

/// Loads tickets and clients, then filters and counts according to `query`.
pub fn load_tickets<R>(repo: &R, query: TicketListQuery) -> ServiceResult<TicketsPageData>
where
    R: TicketReader + ClientReader + ?Sized,
{
    let tickets = repo.list_tickets().map_err(|err| {
        log::error!("Failed to load tickets: {err}");
        err
    })?;
    let clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to load clients: {err}");
        err
    })?;

    let filter = TicketFilter::from_query(&query);
    let filtered: Vec<Ticket> = {
        let directory = ClientDirectory::new(&clients);
        filter_tickets(&tickets, &filter, &directory)
            .into_iter()
            .cloned()
            .collect()
    };
    let stats = ticket_stats(&filtered);
    let search_query = Some(filter.search.trim().to_string()).filter(|s| !s.is_empty());

    Ok(TicketsPageData {
        tickets: filtered,
        clients,
        stats,
        search_query,
    })
}

pub fn create_ticket<R>(
    repo: &R,
    notifier: &dyn Notifier,
    actor: Option<&AuthenticatedUser>,
    form: TicketForm,
) -> ServiceResult<Ticket>
where
    R: TicketWriter + ?Sized,
{
    let actor = require_actor(actor, notifier)?;

    let result = form
        .into_new_ticket(actor.id)
        .map_err(|err| ServiceError::Form(err.to_string()))
        .and_then(|payload| repo.create_ticket(&payload).map_err(ServiceError::from));

    report_outcome(notifier, result, "Ticket created", "Could not create the ticket")
}

pub fn update_ticket<R>(
    repo: &R,
    notifier: &dyn Notifier,
    actor: Option<&AuthenticatedUser>,
    id: TicketId,
    form: TicketForm,
) -> ServiceResult<Ticket>
where
    R: TicketWriter + ?Sized,
{
    let actor = require_actor(actor, notifier)?;

    let result = form
        .into_update(actor.id)
        .map_err(|err| ServiceError::Form(err.to_string()))
        .and_then(|updates| {
            repo.update_ticket(id, &updates)
                .map_err(ServiceError::from)
        });

    report_outcome(notifier, result, "Ticket updated", "Could not update the ticket")
}
