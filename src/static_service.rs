use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::config::APP_CONFIG;

pub static DATABASE_CONNECTION: OnceCell<DatabaseConnection> = OnceCell::const_new();

pub async fn get_database_connection() -> &'static DatabaseConnection {
    DATABASE_CONNECTION
        .get_or_init(|| async {
            let mut options = ConnectOptions::new(APP_CONFIG.database_url.clone());
            options
                .max_connections(20)
                .min_connections(2)
                .connect_timeout(Duration::from_secs(10))
                .sqlx_logging(false);

            tracing::info!("Connecting to database...");
            Database::connect(options)
                .await
                .expect("Failed to connect to database")
        })
        .await
}
