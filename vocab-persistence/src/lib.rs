pub mod connection;
pub mod entities;
pub mod repositories;
pub mod stores;

pub use repositories::KeyValueRepository;
pub use stores::*;

use sea_orm::{DatabaseConnection, DbErr};

pub struct DatabaseManager {
    connection: DatabaseConnection,
}

impl DatabaseManager {
    /// Connects and runs pending migrations
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let connection = connection::connect_and_migrate(database_url).await?;
        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    pub fn stores(&self) -> Stores {
        Stores::new(KeyValueRepository::new(self.connection.clone()))
    }
}
