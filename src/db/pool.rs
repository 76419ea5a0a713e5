use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Open a shared read-only pool over the climate dataset file.
///
/// The dataset is never written by this service. Opening read-only, and
/// never creating a missing file, turns an absent or unreadable dataset
/// into a startup failure instead of a silently empty database.
pub async fn connect_read_only(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}
