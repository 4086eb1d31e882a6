use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientEmail, ClientId, CompanyName};

/// Customer company referenced by opportunities and tickets. Read-only here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub company_name: CompanyName,
    pub contact_name: Option<String>,
    pub email: Option<ClientEmail>,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
}
