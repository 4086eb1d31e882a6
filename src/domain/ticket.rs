use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientId, SellerId, TicketDescription, TicketId, TicketTitle, TypeConstraintError,
};

/// Generates a closed string-backed enum with `as_str`, `Display` and `FromStr`.
///
/// The first literal of each variant is its canonical name; any further
/// literals after `|` are accepted when parsing or deserializing.
macro_rules! string_enum {
    ($name:ident, $doc:expr, { $($variant:ident => $value:literal $(| $alias:literal)*),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[serde(rename = $value $(, alias = $alias)*)]
                $variant
            ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value $(| $alias)* => Ok($name::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(format!(
                        concat!("unknown ", stringify!($name), " `{}`"),
                        other
                    ))),
                }
            }
        }
    };
}

string_enum!(TicketStatus, "Lifecycle state of a support ticket.", {
    Open => "open",
    InProgress => "in-progress" | "in_progress",
    Resolved => "resolved",
    Closed => "closed",
});

string_enum!(TicketPriority, "Urgency assigned to a support ticket.", {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
});

string_enum!(TicketCategory, "Area a support ticket belongs to.", {
    Technical => "technical",
    Billing => "billing",
    Account => "account",
    FeatureRequest => "feature_request",
    Other => "other",
});

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: TicketId,
    pub title: TicketTitle,
    pub description: TicketDescription,
    pub client_id: ClientId,
    pub seller_id: SellerId,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: TicketCategory,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTicket {
    pub title: TicketTitle,
    pub description: TicketDescription,
    pub client_id: ClientId,
    pub seller_id: SellerId,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: TicketCategory,
}

/// Partial ticket update; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateTicket {
    pub title: Option<TicketTitle>,
    pub description: Option<TicketDescription>,
    pub client_id: Option<ClientId>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category: Option<TicketCategory>,
}
