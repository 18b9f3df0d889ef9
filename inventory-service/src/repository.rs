use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::pooled_connection::{bb8::Pool, PoolError};
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use shared::{DecrementOutcome, Part};
use thiserror::Error;
use tracing::info;

use crate::models::PartRow;
use crate::schema::part_inventory_app;

pub type DbPool = Pool<AsyncPgConnection>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to acquire database connection: {0}")]
    Connection(#[from] bb8::RunError<PoolError>),
    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Read and update access to the parts table.
#[async_trait]
pub trait PartRepository: Send + Sync {
    /// All parts, ordered by part number.
    async fn list_parts(&self) -> Result<Vec<Part>, StoreError>;

    async fn get_quantity(&self, part_no: &str) -> Result<Option<i32>, StoreError>;

    /// Takes `amount` out of `part_no` if enough is on hand. The read, the
    /// check and the write happen as one unit; a short or missing part is
    /// left untouched.
    async fn decrement(&self, part_no: &str, amount: i32) -> Result<DecrementOutcome, StoreError>;
}

pub struct PgPartRepository {
    pool: DbPool,
}

impl PgPartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartRepository for PgPartRepository {
    async fn list_parts(&self) -> Result<Vec<Part>, StoreError> {
        let mut conn = self.pool.get().await?;

        let rows = part_inventory_app::table
            .select(PartRow::as_select())
            .order(part_inventory_app::part_no.asc())
            .load::<PartRow>(&mut conn)
            .await?;

        info!("Current part inventory: {} parts", rows.len());
        Ok(rows.into_iter().map(Part::from).collect())
    }

    async fn get_quantity(&self, part_no: &str) -> Result<Option<i32>, StoreError> {
        let mut conn = self.pool.get().await?;

        let quant = part_inventory_app::table
            .filter(part_inventory_app::part_no.eq(part_no))
            .select(part_inventory_app::quant)
            .first::<i32>(&mut conn)
            .await
            .optional()?;

        Ok(quant)
    }

    async fn decrement(&self, part_no: &str, amount: i32) -> Result<DecrementOutcome, StoreError> {
        let mut pooled = self.pool.get().await?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        let part_no = part_no.to_string();

        let outcome = conn
            .transaction::<_, StoreError, _>(|conn| {
                Box::pin(async move {
                    let current = part_inventory_app::table
                        .filter(part_inventory_app::part_no.eq(&part_no))
                        .select(part_inventory_app::quant)
                        .for_update()
                        .first::<i32>(conn)
                        .await
                        .optional()?;

                    let current = match current {
                        Some(current) => current,
                        None => return Ok(DecrementOutcome::NotFound),
                    };

                    if current < amount {
                        return Ok(DecrementOutcome::Insufficient { available: current });
                    }

                    diesel::update(part_inventory_app::table.filter(part_inventory_app::part_no.eq(&part_no)))
                        .set(part_inventory_app::quant.eq(current - amount))
                        .execute(conn)
                        .await?;

                    Ok(DecrementOutcome::Applied {
                        remaining: current - amount,
                    })
                })
            })
            .await?;

        Ok(outcome)
    }
}
