pub mod queries;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use queries::categories::Category;
pub use queries::questions::{JoinedQuestion, NewQuestion, Question};

use sqlx::Error;

const SCHEMA: &str = include_str!("schema.sql");

pub async fn establish_connection(url: &str) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    SqlitePool::connect_with(options).await
}

/// A private in-memory database. The pool is pinned to a single connection
/// that is never recycled, since every SQLite memory connection is its own
/// database.
pub async fn establish_in_memory() -> Result<SqlitePool, Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

/// Creates the `categories` and `questions` tables when they are missing.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) async fn seeded_pool() -> SqlitePool {
        let pool = establish_in_memory().await.unwrap();
        init_schema(&pool).await.unwrap();
        for (id, name) in [(1, "Science"), (2, "Art"), (3, "History")] {
            queries::categories::create_category(&pool, id, name)
                .await
                .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let pool = establish_in_memory().await.unwrap();
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
