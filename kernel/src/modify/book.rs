use crate::database::{DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Book, BookId};
use crate::query::BookQuery;
use crate::KernelError;

/// Write side of a book store.
///
/// `update` and `delete` on an id the store does not hold leave the store untouched and
/// return `Ok(())`.
#[async_trait::async_trait]
pub trait BookModifier<Connection: Send>: Sync + Send + 'static {
    /// Stores `book` and writes the id it was given back into it.
    async fn create(
        &self,
        con: &mut Connection,
        book: &mut Book,
    ) -> error_stack::Result<(), KernelError>;

    async fn update(
        &self,
        con: &mut Connection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;

    async fn delete(
        &self,
        con: &mut Connection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait BookStore<Connection: Send>: BookQuery<Connection> + BookModifier<Connection> {}

impl<Connection: Send, T> BookStore<Connection> for T where
    T: BookQuery<Connection> + BookModifier<Connection>
{
}

pub trait DependOnBookStore: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookStore: BookStore<<Self::DatabaseConnection as DatabaseConnection>::Connection>;
    fn book_store(&self) -> &Self::BookStore;
}
