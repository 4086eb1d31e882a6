//! Create/edit form for support tickets.

use serde::Deserialize;
use validator::Validate;

use crate::domain::ticket::{NewTicket, TicketCategory, TicketPriority, TicketStatus, UpdateTicket};
use crate::domain::types::{ClientId, SellerId, TicketDescription, TicketTitle};
use crate::forms::FormError;

fn default_status() -> String {
    TicketStatus::Open.as_str().to_string()
}

fn default_priority() -> String {
    TicketPriority::Medium.as_str().to_string()
}

fn default_category() -> String {
    TicketCategory::Other.as_str().to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TicketForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1))]
    pub client_id: i32,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default = "default_category")]
    pub category: String,
}

impl TicketForm {
    pub fn into_new_ticket(self, seller_id: SellerId) -> Result<NewTicket, FormError> {
        self.validate()?;

        Ok(NewTicket {
            title: TicketTitle::new(self.title).map_err(|_| FormError::InvalidTitle)?,
            description: TicketDescription::new(self.description),
            client_id: ClientId::new(self.client_id).map_err(|_| FormError::InvalidClientId)?,
            seller_id,
            status: self.status.parse().map_err(|_| FormError::InvalidStatus)?,
            priority: self
                .priority
                .parse()
                .map_err(|_| FormError::InvalidPriority)?,
            category: self
                .category
                .parse()
                .map_err(|_| FormError::InvalidCategory)?,
        })
    }

    /// Full edit of an existing ticket. The owning seller is never reassigned.
    pub fn into_update(self, seller_id: SellerId) -> Result<UpdateTicket, FormError> {
        let ticket = self.into_new_ticket(seller_id)?;
        Ok(UpdateTicket {
            title: Some(ticket.title),
            description: Some(ticket.description),
            client_id: Some(ticket.client_id),
            status: Some(ticket.status),
            priority: Some(ticket.priority),
            category: Some(ticket.category),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TicketForm {
        TicketForm {
            title: "  VPN drops  ".to_string(),
            description: "<img src=x onerror=alert(1)>Every hour".to_string(),
            client_id: 2,
            status: "open".to_string(),
            priority: "urgent".to_string(),
            category: "technical".to_string(),
        }
    }

    #[test]
    fn builds_trimmed_sanitized_ticket() {
        let ticket = form().into_new_ticket(SellerId::new(1).unwrap()).unwrap();

        assert_eq!(ticket.title.as_str(), "VPN drops");
        assert!(!ticket.description.as_str().contains("onerror"));
        assert_eq!(ticket.priority, TicketPriority::Urgent);
        assert_eq!(ticket.category, TicketCategory::Technical);
    }

    #[test]
    fn blank_title_is_rejected() {
        let result = TicketForm {
            title: "   ".to_string(),
            ..form()
        }
        .into_new_ticket(SellerId::new(1).unwrap());

        assert!(matches!(result, Err(FormError::InvalidTitle)));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = TicketForm {
            status: "waiting".to_string(),
            ..form()
        }
        .into_update(SellerId::new(1).unwrap());

        assert!(matches!(result, Err(FormError::InvalidStatus)));
    }

    #[test]
    fn defaults_apply_when_fields_are_missing() {
        let form = minimal_form("Printer", 4);
        let ticket = form.into_new_ticket(SellerId::new(1).unwrap()).unwrap();

        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, TicketPriority::Medium);
        assert_eq!(ticket.category, TicketCategory::Other);
    }

    fn minimal_form(title: &str, client_id: i32) -> TicketForm {
        TicketForm {
            title: title.to_string(),
            description: String::new(),
            client_id,
            status: default_status(),
            priority: default_priority(),
            category: default_category(),
        }
    }
}
