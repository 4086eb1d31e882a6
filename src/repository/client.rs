use diesel::prelude::*;

use crate::domain::client::Client;
use crate::models::client::Client as DbClient;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, DieselRepository};

impl ClientReader for DieselRepository {
    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let rows = clients::table
            .order(clients::company_name.asc())
            .select(DbClient::as_select())
            .load::<DbClient>(&mut conn)?;

        rows.into_iter()
            .map(|row| Client::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}
