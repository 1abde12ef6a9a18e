use std::{env, sync::Arc};

use log::{error, info};
use podtrack_db::SqliteDatabase;
use podtrack_server::{logging, run_server, ServerContext};

const DEFAULT_DATABASE_URL: &str = "sqlite://podtrack.db";

#[tokio::main]
async fn main() {
    logging::init_logger();

    let database_url =
        env::var("PODTRACK_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    info!("Connecting to database...");

    let database = match SqliteDatabase::new(&database_url).await {
        Ok(database) => database,
        Err(e) => {
            error!("Could not open database at {database_url}: {e}");
            return;
        }
    };

    let context = ServerContext {
        database: Arc::new(database),
    };

    info!("Initialized successfully.");
    run_server(context).await;
}
