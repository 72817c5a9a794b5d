use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::models::{Address, GeoPoint, NewAddress};
use crate::services::store::{AddressStore, StoreError};

const ADDRESS_COLUMNS: &str = "id, name, latitude, longitude, created_at, updated_at";

/// PostgreSQL-backed address store
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    fn address_from_row(row: &PgRow) -> Result<Address, sqlx::Error> {
        Ok(Address {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            location: GeoPoint::new(row.try_get("latitude")?, row.try_get("longitude")?),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl AddressStore for PostgresStore {
    async fn create(&self, address: &NewAddress) -> Result<Address, StoreError> {
        let query = format!(
            "INSERT INTO addresses (name, latitude, longitude) VALUES ($1, $2, $3) RETURNING {ADDRESS_COLUMNS}"
        );

        let row = sqlx::query(&query)
            .bind(&address.name)
            .bind(address.latitude)
            .bind(address.longitude)
            .fetch_one(&self.pool)
            .await?;

        let created = Self::address_from_row(&row)?;
        tracing::debug!("Inserted address {} ({})", created.id, created.name);

        Ok(created)
    }

    async fn get(&self, id: i64) -> Result<Option<Address>, StoreError> {
        let query = format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1");

        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;

        Ok(row.as_ref().map(Self::address_from_row).transpose()?)
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Address>, StoreError> {
        let query = format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses ORDER BY id LIMIT $1 OFFSET $2"
        );

        let rows = sqlx::query(&query)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await?;

        let addresses: Result<Vec<Address>, _> = rows.iter().map(Self::address_from_row).collect();

        Ok(addresses?)
    }

    async fn all(&self) -> Result<Vec<Address>, StoreError> {
        let query = format!("SELECT {ADDRESS_COLUMNS} FROM addresses ORDER BY id");

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let addresses: Result<Vec<Address>, _> = rows.iter().map(Self::address_from_row).collect();

        Ok(addresses?)
    }

    async fn update(&self, id: i64, address: &NewAddress) -> Result<Option<Address>, StoreError> {
        let query = format!(
            r#"
            UPDATE addresses
            SET name = $2, latitude = $3, longitude = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {ADDRESS_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(&address.name)
            .bind(address.latitude)
            .bind(address.longitude)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::address_from_row).transpose()?)
    }

    async fn delete(&self, id: i64) -> Result<Option<Address>, StoreError> {
        let query = format!("DELETE FROM addresses WHERE id = $1 RETURNING {ADDRESS_COLUMNS}");

        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;

        let deleted = row.as_ref().map(Self::address_from_row).transpose()?;
        if let Some(address) = &deleted {
            tracing::debug!("Deleted address {} ({})", address.id, address.name);
        }

        Ok(deleted)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
