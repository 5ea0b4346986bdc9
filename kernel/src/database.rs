use crate::entity::SessionId;
use crate::KernelError;

/// Hands out the storage handle a single request works with.
///
/// The session is passed along so that session-scoped stores can pick the right shelf;
/// stores shared by every user ignore it.
#[async_trait::async_trait]
pub trait DatabaseConnection: 'static + Sync + Send {
    type Connection: Send;
    async fn transact(
        &self,
        session: &SessionId,
    ) -> error_stack::Result<Self::Connection, KernelError>;
}

pub trait DependOnDatabaseConnection: 'static + Sync + Send {
    type DatabaseConnection: DatabaseConnection;
    fn database_connection(&self) -> &Self::DatabaseConnection;
}

impl<T> DependOnDatabaseConnection for T
where
    T: DatabaseConnection,
{
    type DatabaseConnection = T;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        self
    }
}
