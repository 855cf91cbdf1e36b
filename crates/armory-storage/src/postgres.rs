use crate::pool::PoolSettings;
use armory_core::error::{Result, StorageError};
use armory_core::item::{Effect, Item, ItemId, ItemInput};
use armory_core::repository::ItemRepository;
use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

/// PostgreSQL implementation of the repository contract.
///
/// Items live in a single `items` table (see `ddl/postgres/items.sql`). The
/// effect map is stored as JSON text and `created_at` as microseconds since
/// the Unix epoch, assigned by the repository on insert. Ids come from the
/// `BIGSERIAL` sequence.
#[derive(Debug, Clone)]
pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    /// Creates a repository from an existing PostgreSQL connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new pool with default settings.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with(database_url, PoolSettings::default()).await
    }

    /// Creates a repository by opening a new pool with the given settings.
    pub async fn connect_with(database_url: &str, settings: PoolSettings) -> Result<Self> {
        let pool = settings
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn now_unix_micros() -> i64 {
    Timestamp::now().as_microsecond()
}

fn parse_created_at(micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", micros))
    })
}

fn parse_effect(text: &str) -> Result<Effect> {
    Effect::from_json(text)
        .map_err(|e| StorageError::InvalidData(format!("invalid effect json '{}': {e}", text)))
}

fn encode_effect(effect: &Effect) -> Result<String> {
    effect
        .to_json()
        .map_err(|e| StorageError::InvalidData(format!("cannot encode effect: {e}")))
}

fn map_row(row: &PgRow) -> Result<Item> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let effect: String = row.try_get("effect").map_err(map_sqlx_error)?;
    let price: f64 = row.try_get("price").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(Item {
        id: ItemId::new(id),
        name,
        effect: parse_effect(&effect)?,
        price,
        created_at: parse_created_at(created_at)?,
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn get_all(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, effect, price, created_at
            FROM items
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(map_row).collect()
    }

    async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, effect, price, created_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn create(&self, input: ItemInput) -> Result<Item> {
        let effect = encode_effect(&input.effect)?;

        let row = sqlx::query(
            r#"
            INSERT INTO items (name, effect, price, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, effect, price, created_at
            "#,
        )
        .bind(input.name)
        .bind(effect)
        .bind(input.price)
        .bind(now_unix_micros())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let item = map_row(&row)?;
        debug!(id = %item.id, "inserted item");
        Ok(item)
    }

    async fn update(&self, id: ItemId, input: ItemInput) -> Result<Option<Item>> {
        let effect = encode_effect(&input.effect)?;

        let row = sqlx::query(
            r#"
            UPDATE items
            SET name = $2, effect = $3, price = $4
            WHERE id = $1
            RETURNING id, name, effect, price, created_at
            "#,
        )
        .bind(id.get())
        .bind(input.name)
        .bind(effect)
        .bind(input.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn delete(&self, id: ItemId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM items
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
