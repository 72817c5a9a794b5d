use std::future::Future;
use thiserror::Error;

use crate::models::{Address, NewAddress};

/// Errors that can occur when reading or writing addresses
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Persistence for address records
///
/// Missing records are reported as `Ok(None)` rather than an error.
pub trait AddressStore {
    fn create(&self, address: &NewAddress) -> impl Future<Output = Result<Address, StoreError>>;

    fn get(&self, id: i64) -> impl Future<Output = Result<Option<Address>, StoreError>>;

    /// Page of addresses ordered by id
    fn list(&self, skip: u32, limit: u32) -> impl Future<Output = Result<Vec<Address>, StoreError>>;

    /// Every stored address ordered by id; the candidate set for proximity queries
    fn all(&self) -> impl Future<Output = Result<Vec<Address>, StoreError>>;

    fn update(
        &self,
        id: i64,
        address: &NewAddress,
    ) -> impl Future<Output = Result<Option<Address>, StoreError>>;

    /// Remove an address, returning the deleted record
    fn delete(&self, id: i64) -> impl Future<Output = Result<Option<Address>, StoreError>>;

    fn health_check(&self) -> impl Future<Output = Result<bool, StoreError>>;
}
