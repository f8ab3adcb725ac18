pub mod language;
pub mod repository;
pub mod schema;
pub mod stats;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use thiserror::Error;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Error)]
pub enum InitPoolError {
    #[error("BuildPool: {source}")]
    BuildPool {
        #[from]
        source: r2d2::Error,
    },
}

pub fn init_pool(database_url: &str, max_size: u32) -> Result<PgPool, InitPoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|source| InitPoolError::BuildPool { source })
}
