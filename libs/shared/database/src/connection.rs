use anyhow::{Context, Result};
use mongodb::{
    bson::doc,
    options::{ClientOptions, IndexOptions},
    Client, Database, IndexModel,
};
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::mongo::{APPOINTMENTS_COLLECTION, DOCTORS_COLLECTION};

const APP_NAME: &str = "clinic-api";

/// Open the one long-lived connection used by the process.
///
/// A single attempt is made: the client is built, the server is pinged and
/// the indexes are ensured. Any failure is returned to the caller, which is
/// expected to treat it as fatal.
pub async fn connect(config: &AppConfig) -> Result<Database> {
    let mut options = ClientOptions::parse(&config.mongo_uri)
        .await
        .context("Invalid MongoDB connection string")?;
    options.app_name = Some(APP_NAME.to_string());
    options.server_selection_timeout = Some(config.store_timeout);
    options.connect_timeout = Some(config.store_timeout);

    let client = Client::with_options(options).context("Failed to initialize MongoDB client")?;
    let database = client.database(&config.mongo_database);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .context("Failed to ping MongoDB")?;

    ensure_indexes(&database).await?;

    info!("Connected to MongoDB database {}", config.mongo_database);
    Ok(database)
}

async fn ensure_indexes(database: &Database) -> Result<()> {
    let unique_email = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    database
        .collection::<mongodb::bson::Document>(DOCTORS_COLLECTION)
        .create_index(unique_email)
        .await
        .context("Failed to create doctors.email index")?;

    let by_doctor = IndexModel::builder()
        .keys(doc! { "doctor_id": 1, "created_at": 1 })
        .build();
    database
        .collection::<mongodb::bson::Document>(APPOINTMENTS_COLLECTION)
        .create_index(by_doctor)
        .await
        .context("Failed to create appointments.doctor_id index")?;

    debug!("MongoDB indexes ensured");
    Ok(())
}
