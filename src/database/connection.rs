use mongodb::{bson::doc, Client, Database};

use crate::config::AppConfig;
use crate::errors::Result;

pub async fn get_db_client(config: &AppConfig) -> Result<Database> {
    let client = Client::with_uri_str(&config.database_url).await?;
    let db = client.database(&config.database_name);

    // Verify the database is reachable and has the collections we read
    match db.list_collection_names().await {
        Ok(collections) => {
            tracing::info!("✅ Connected to database: {}", config.database_name);
            tracing::info!("📂 Collections found: {:?}", collections);

            for expected in ["teams", "players", "fixtures", "team_stats", "standings"] {
                if !collections.iter().any(|c| c == expected) {
                    tracing::warn!("⚠️ '{}' collection not found in database", expected);
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Database '{}' may not exist or is inaccessible: {}",
                config.database_name,
                e
            );
        }
    }

    db.run_command(doc! { "ping": 1 }).await?;
    Ok(db)
}
