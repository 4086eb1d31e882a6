use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::Client as DomainClient;
use crate::domain::types::{ClientEmail, ClientId, CompanyName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`], used for seeding reference data.
pub struct NewClient<'a> {
    pub company_name: &'a str,
    pub contact_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
}

/// Blank optional columns are treated as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            company_name: CompanyName::new(client.company_name)?,
            contact_name: non_blank(client.contact_name),
            email: non_blank(client.email).map(ClientEmail::new).transpose()?,
            phone: non_blank(client.phone),
            created_at: client.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn client_into_domain_drops_blank_fields() {
        let now = Utc::now().naive_utc();
        let db_client = Client {
            id: 4,
            company_name: " Acme ".to_string(),
            contact_name: Some("  ".to_string()),
            email: Some("Buyer@Acme.io".to_string()),
            phone: None,
            created_at: now,
        };

        let domain = DomainClient::try_from(db_client).unwrap();

        assert_eq!(domain.id.get(), 4);
        assert_eq!(domain.company_name.as_str(), "Acme");
        assert_eq!(domain.contact_name, None);
        assert_eq!(domain.email.unwrap().as_str(), "buyer@acme.io");
    }

    #[test]
    fn client_with_invalid_email_is_rejected() {
        let db_client = Client {
            id: 1,
            company_name: "Acme".to_string(),
            contact_name: None,
            email: Some("nope".to_string()),
            phone: None,
            created_at: Utc::now().naive_utc(),
        };

        assert_eq!(
            DomainClient::try_from(db_client),
            Err(TypeConstraintError::InvalidEmail)
        );
    }
}
