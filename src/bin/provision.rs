//! Provisions a fresh database: drops whatever is there, recreates the
//! collections, seeds the id counter, and inserts a handful of sample
//! items. Destructive by design; point it at a disposable database.

use chrono::{DateTime, TimeZone, Utc};
use tracing_subscriber::EnvFilter;

use todo_store::{
    DbConfig, EmptyDescription, ItemStore, MongoItemStore, Sequence, TODO_ITEM_SEQUENCE,
    TodoItem, TodoItemDao,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = DbConfig::from_env();
    let store = MongoItemStore::connect(&config).await?;

    tracing::info!(database = %config.database, "dropping and recreating database");
    store.reset_database().await?;
    store.create_collection(&config.items_collection).await?;
    store.create_collection(&config.sequences_collection).await?;
    store.ensure_id_index(&config.items_collection).await?;

    let counter = bson::to_document(&Sequence::initial(TODO_ITEM_SEQUENCE))?;
    store.insert_one(&config.sequences_collection, counter).await?;
    tracing::info!(sequence = TODO_ITEM_SEQUENCE, "seeded id counter");

    let dao = TodoItemDao::with_config(store.clone(), &config);
    for mut item in sample_items()? {
        let id = dao.insert(&mut item).await?;
        tracing::info!(id, description = %item.description, "inserted sample item");
    }

    store.shutdown().await;
    Ok(())
}

fn sample_items() -> Result<Vec<TodoItem>, EmptyDescription> {
    Ok(vec![
        sample(
            "Make up some new ToDos",
            &[],
            Some(Utc.with_ymd_and_hms(2019, 1, 1, 10, 45, 0).unwrap()),
        )?,
        sample(
            "Prep for Monday's class",
            &["tag1", "tag2"],
            Some(Utc.with_ymd_and_hms(2019, 10, 1, 0, 0, 0).unwrap()),
        )?,
        sample("Answer recruiter emails on LinkedIn", &["tag1", "tag2"], None)?,
        sample(
            "Take Gracie to the park",
            &[],
            Some(Utc.with_ymd_and_hms(2020, 4, 7, 11, 45, 0).unwrap()),
        )?,
        sample("Finish writing book", &["tag1", "tag2"], None)?,
    ])
}

fn sample(
    description: &str,
    tags: &[&str],
    deadline: Option<DateTime<Utc>>,
) -> Result<TodoItem, EmptyDescription> {
    let mut item = TodoItem::new(description)?;
    item.tags = tags.iter().map(|tag| tag.to_string()).collect();
    item.deadline = deadline.map(|at| at.to_rfc2822()).unwrap_or_default();
    Ok(item)
}
