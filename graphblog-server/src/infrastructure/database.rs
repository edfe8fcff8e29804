use anyhow::{Context, Result};
use mongodb::bson::{Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use tracing::info;

use crate::data::repositories::mongo::{POSTS_COLLECTION, USERS_COLLECTION};

pub(crate) async fn connect(uri: &str, database: &str) -> Result<Database> {
    let client = Client::with_uri_str(uri)
        .await
        .context("failed to create MongoDB client")?;
    let db = client.database(database);

    db.run_command(doc! { "ping": 1 })
        .await
        .context("MongoDB ping failed")?;

    info!(database, "connected to MongoDB");
    Ok(db)
}

pub(crate) async fn ensure_indexes(db: &Database) -> Result<()> {
    db.collection::<Document>(USERS_COLLECTION)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await
        .context("failed to create users.email index")?;

    db.collection::<Document>(POSTS_COLLECTION)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "createdAt": -1, "_id": -1 })
                .build(),
        )
        .await
        .context("failed to create posts.createdAt index")?;

    Ok(())
}
