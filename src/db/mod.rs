use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

pub mod queries;

pub type DbPool = Pool<Postgres>;

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::query(queries::CREATE_VEHICLE_SNAPSHOTS)
        .execute(&pool)
        .await?;
    info!("Schema ready (vehicle_snapshots)");

    Ok(pool)
}
