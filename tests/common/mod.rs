use diesel::prelude::*;
use tempfile::TempDir;

use pipeline_crm::db::{ConnectionOptions, DbPool, establish_connection_pool, run_migrations};
use pipeline_crm::domain::types::ClientId;
use pipeline_crm::models::client::NewClient;
use pipeline_crm::schema::clients;

/// Migrated SQLite database living in a temporary directory.
///
/// The directory, and with it the database file, is removed on drop.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(filename);
        let pool = establish_connection_pool(
            path.to_str().expect("utf-8 path"),
            ConnectionOptions::default(),
        )
        .expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Inserts a client row and returns its id.
    pub fn seed_client(&self, company_name: &str, email: Option<&str>) -> ClientId {
        let mut conn = self.pool.get().expect("connection");
        let id: i32 = diesel::insert_into(clients::table)
            .values(&NewClient {
                company_name,
                contact_name: None,
                email,
                phone: None,
            })
            .returning(clients::id)
            .get_result(&mut conn)
            .expect("insert client");
        ClientId::new(id).expect("positive id")
    }
}
