use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Connection pool settings supplied by the process that owns the pool.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct PoolSettings {
    #[builder(default = 5)]
    pub max_connections: u32,
    #[builder(default = Duration::from_secs(30))]
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PoolSettings {
    /// Opens a PostgreSQL pool with these settings.
    pub async fn connect(&self, database_url: &str) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect(database_url)
            .await
    }
}
