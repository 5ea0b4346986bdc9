use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookAuthor, BookDescription, BookId, BookTitle};
use kernel::KernelError;

use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery<PoolConnection<Postgres>> for PostgresBookRepository {
    async fn find_all(
        &self,
        con: &mut PoolConnection<Postgres>,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl BookModifier<PoolConnection<Postgres>> for PostgresBookRepository {
    async fn create(
        &self,
        con: &mut PoolConnection<Postgres>,
        book: &mut Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PoolConnection<Postgres>,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn delete(
        &self,
        con: &mut PoolConnection<Postgres>,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, book_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    description: Option<String>,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookDescription::from_nullable(value.description),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, description
            FROM book
            ORDER BY id ASC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, description
            FROM book
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        let found = row.map(Book::from);
        Ok(found)
    }

    #[tracing::instrument(skip_all)]
    async fn create(
        con: &mut PgConnection,
        book: &mut Book,
    ) -> error_stack::Result<(), KernelError> {
        book.validate()?;
        let id: i64 = sqlx::query_scalar(
            // language=postgresql
            r#"
            INSERT INTO book (title, author, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.description().as_deref())
        .fetch_one(con)
        .await
        .convert_error()?;
        book.assign_id(BookId::new(id));
        tracing::debug!(%id, "inserted book");
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(id = %book.id()))]
    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        book.validate()?;
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE book
            SET title = $2, author = $3, description = $4
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.description().as_deref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            tracing::debug!("no book to update");
        }
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(id = %book_id))]
    async fn delete(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            DELETE FROM book
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            tracing::debug!("no book to delete");
        }
        Ok(())
    }
}
