use std::sync::Arc;

use axum::extract::FromRef;
use podtrack_db::SqliteDatabase;

#[derive(Clone, FromRef)]
pub struct ServerContext {
    pub database: Arc<SqliteDatabase>,
}
