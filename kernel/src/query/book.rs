use crate::entity::{Book, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery<Connection: Send>: Sync + Send + 'static {
    /// Every book in the store, ordered by ascending id.
    async fn find_all(&self, con: &mut Connection) -> error_stack::Result<Vec<Book>, KernelError>;

    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
}
