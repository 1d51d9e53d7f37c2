use std::net::SocketAddr;

use migration::{Migrator, MigratorTrait};
use remedial_service::bootstrap::initialize_admin_user;
use remedial_service::static_service::get_database_connection;
use remedial_service::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    tracing::info!("Starting application...");

    tracing::info!("Create media folder {}", APP_CONFIG.media_root);
    tokio::fs::create_dir_all(&APP_CONFIG.media_root).await?;

    let db_connection = get_database_connection().await;

    tracing::info!("Running migrations...");
    Migrator::up(db_connection, None).await?;

    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_admin_user(
        db_connection,
        &APP_CONFIG.admin_username,
        &APP_CONFIG.admin_password,
    )
    .await
    {
        tracing::error!("Failed to initialize admin user: {}", e);
        tracing::warn!("Continuing without admin user initialization...");
    }

    let app = app::create_app().await?;

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(&http_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
