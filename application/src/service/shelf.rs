use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::BookQuery;
use kernel::interface::update::{BookModifier, DependOnBookStore};
use kernel::prelude::entity::{Book, BookAuthor, BookDescription, BookId, BookTitle, SessionId};
use kernel::KernelError;

use crate::transfer::{BookDto, ShelfOperation, ShelfPage, ShelfRequest};

/// Runs one request against whichever book store the implementor depends on.
///
/// The whole request shares a single connection. A failed mutation ends the request with
/// its error; a successful one is followed by the list page.
#[async_trait::async_trait]
pub trait ShelfService: 'static + Sync + Send + DependOnBookStore {
    async fn handle_shelf(
        &self,
        session: &SessionId,
        request: ShelfRequest,
    ) -> error_stack::Result<ShelfPage, KernelError> {
        let mut connection = self.database_connection().transact(session).await?;
        let store = self.book_store();

        match request {
            ShelfRequest::Detail { id } => {
                let id = id.parse::<BookId>()?;
                let book = store
                    .find_by_id(&mut connection, &id)
                    .await?
                    .ok_or_else(|| {
                        Report::new(KernelError::NotFound)
                            .attach_printable(format!("No book with id {id}"))
                    })?;
                return Ok(ShelfPage::Detail(BookDto::from(book)));
            }
            ShelfRequest::Mutate(operation) => match operation {
                ShelfOperation::Add {
                    title,
                    author,
                    description,
                } => {
                    let mut book = Book::pending(
                        BookTitle::new(title),
                        BookAuthor::new(author),
                        BookDescription::new(description),
                    );
                    store.create(&mut connection, &mut book).await?;
                    tracing::info!(%session, id = %book.id(), "book added");
                }
                ShelfOperation::Modify {
                    id,
                    title,
                    author,
                    description,
                } => {
                    let book = Book::new(
                        id.parse::<BookId>()?,
                        BookTitle::new(title),
                        BookAuthor::new(author),
                        BookDescription::new(description),
                    );
                    store.update(&mut connection, &book).await?;
                    tracing::info!(%session, id = %book.id(), "book modified");
                }
                ShelfOperation::Delete { id } => {
                    let id = id.parse::<BookId>()?;
                    store.delete(&mut connection, &id).await?;
                    tracing::info!(%session, %id, "book deleted");
                }
                ShelfOperation::Unknown(token) => {
                    tracing::warn!(%session, %token, "ignoring unknown operation");
                }
            },
            ShelfRequest::List => {}
        }

        let books = store.find_all(&mut connection).await?;
        Ok(ShelfPage::List(
            books.into_iter().map(BookDto::from).collect(),
        ))
    }
}

impl<T> ShelfService for T where T: DependOnBookStore {}
