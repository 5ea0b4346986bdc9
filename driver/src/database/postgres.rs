use std::time::Duration;

use error_stack::ResultExt;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use kernel::interface::database::DatabaseConnection;
use kernel::interface::update::DependOnBookStore;
use kernel::prelude::entity::SessionId;
use kernel::KernelError;

use crate::env;

pub use self::book::*;

mod book;

static POSTGRES_URL: &str = "POSTGRES_URL";
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Book store backed by the shared `book` table.
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        Self::with_url(&url)
    }

    /// The pool connects lazily, so an unreachable server surfaces on the first request
    /// rather than here. A malformed url fails immediately.
    pub fn with_url(url: &str) -> error_stack::Result<Self, KernelError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy(url)
            .change_context_lazy(|| KernelError::Construction)
            .attach_printable("Failed to configure the postgres pool")?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Connection = PoolConnection<Postgres>;
    async fn transact(
        &self,
        _session: &SessionId,
    ) -> error_stack::Result<Self::Connection, KernelError> {
        let con = self
            .pool
            .acquire()
            .await
            .change_context_lazy(|| KernelError::Construction)
            .attach_printable("Failed to acquire a postgres connection")?;
        Ok(con)
    }
}

impl DependOnBookStore for PostgresDatabase {
    type BookStore = PostgresBookRepository;
    fn book_store(&self) -> &Self::BookStore {
        &PostgresBookRepository
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::prelude::entity::SessionId;
    use kernel::KernelError;

    use super::PostgresDatabase;

    #[tokio::test]
    async fn malformed_url_is_construction_failure() {
        let report = PostgresDatabase::with_url("not a url").err().unwrap();
        assert_eq!(report.current_context(), &KernelError::Construction);
    }

    #[tokio::test]
    async fn unreachable_server_fails_on_transact() {
        let db = PostgresDatabase::with_url("postgres://bookshelf@127.0.0.1:1/bookshelf").unwrap();
        let report = db.transact(&SessionId::generate()).await.err().unwrap();
        assert_eq!(report.current_context(), &KernelError::Construction);
    }
}
