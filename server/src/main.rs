use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use todo_core::{MemoryStore, MongoStore, TodoService, TodoStore};
use todo_server::{Config, StoreKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info")
                    .add_directive("todo_server=debug".parse().unwrap())
                    .add_directive("todo_core=debug".parse().unwrap())
                    .add_directive("tower_http=debug".parse().unwrap())
            }),
        )
        .init();

    let config = Config::parse();

    let (store, mongo): (Arc<dyn TodoStore>, Option<MongoStore>) = match config.store {
        StoreKind::Mongo => {
            let mongo =
                MongoStore::connect(&config.mongo_uri, &config.database, &config.collection)
                    .await
                    .context("unable to connect to mongodb")?;
            let store: Arc<dyn TodoStore> = Arc::new(mongo.clone());
            (store, Some(mongo))
        }
        StoreKind::Memory => {
            let store: Arc<dyn TodoStore> = Arc::new(MemoryStore::new());
            (store, None)
        }
    };
    let service = TodoService::new(store)
        .await
        .context("failed to prepare the lists collection")?;

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    todo_server::run(listener, service, todo_server::shutdown_signal()).await?;

    if let Some(mongo) = mongo {
        mongo.shutdown(config.drop_on_shutdown).await?;
    }
    info!("server stopped");
    Ok(())
}
