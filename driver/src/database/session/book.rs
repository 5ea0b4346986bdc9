use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

use crate::database::session::SessionConnection;

pub struct SessionBookRepository;

#[async_trait::async_trait]
impl BookQuery<SessionConnection> for SessionBookRepository {
    async fn find_all(
        &self,
        con: &mut SessionConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.books.clone())
    }

    async fn find_by_id(
        &self,
        con: &mut SessionConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.books.iter().find(|book| book.id() == id).cloned())
    }
}

#[async_trait::async_trait]
impl BookModifier<SessionConnection> for SessionBookRepository {
    async fn create(
        &self,
        con: &mut SessionConnection,
        book: &mut Book,
    ) -> error_stack::Result<(), KernelError> {
        book.validate()?;
        let id = con.issue_id();
        book.assign_id(id);
        con.books.push(book.clone());
        tracing::debug!(%id, "added book to session shelf");
        Ok(())
    }

    async fn update(
        &self,
        con: &mut SessionConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        book.validate()?;
        match con.position(book.id()) {
            Some(index) => con.books[index] = book.clone(),
            None => tracing::debug!(id = %book.id(), "no book to update"),
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut SessionConnection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        match con.position(book_id) {
            Some(index) => {
                con.books.remove(index);
            }
            None => tracing::debug!(id = %book_id, "no book to delete"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookDescription, BookId, BookTitle, SessionId,
    };
    use kernel::KernelError;

    use crate::database::session::book::SessionBookRepository;
    use crate::database::session::SessionDatabase;

    fn pending(title: &str, author: &str, description: &str) -> Book {
        Book::pending(
            BookTitle::new(title),
            BookAuthor::new(author),
            BookDescription::new(description),
        )
    }

    #[tokio::test]
    async fn seeded_session_has_samples() -> error_stack::Result<(), KernelError> {
        let db = SessionDatabase::seeded();
        let mut con = db.transact(&SessionId::generate()).await?;

        let all = SessionBookRepository.find_all(&mut con).await?;
        let ids = all.iter().map(|b| *b.id().as_ref()).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(all[0].title().as_ref(), "Jungle Book");
        assert_eq!(all[1].description().as_deref(), None);
        Ok(())
    }

    #[tokio::test]
    async fn lifecycle_on_empty_shelf() -> error_stack::Result<(), KernelError> {
        let db = SessionDatabase::empty();
        let mut con = db.transact(&SessionId::generate()).await?;

        let mut dune = pending("Dune", "F. Herbert", "");
        SessionBookRepository.create(&mut con, &mut dune).await?;
        assert_eq!(dune.id(), &BookId::new(1));

        let all = SessionBookRepository.find_all(&mut con).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), &BookId::new(1));
        assert_eq!(all[0].description().as_deref(), None);

        let found = SessionBookRepository
            .find_by_id(&mut con, &BookId::new(1))
            .await?;
        assert_eq!(found.as_ref(), Some(&dune));

        let messiah = dune.reconstruct(|b| b.title = BookTitle::new("Dune Messiah"));
        SessionBookRepository.update(&mut con, &messiah).await?;
        let found = SessionBookRepository
            .find_by_id(&mut con, &BookId::new(1))
            .await?;
        assert_eq!(
            found.map(|b| b.title().clone()),
            Some(BookTitle::new("Dune Messiah"))
        );

        SessionBookRepository
            .delete(&mut con, &BookId::new(1))
            .await?;
        assert!(SessionBookRepository.find_all(&mut con).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn rejects_missing_fields() -> error_stack::Result<(), KernelError> {
        let db = SessionDatabase::seeded();
        let mut con = db.transact(&SessionId::generate()).await?;

        for (title, author) in [("", "X"), ("X", ""), ("", "")] {
            let mut book = pending(title, author, "Y");
            let report = SessionBookRepository
                .create(&mut con, &mut book)
                .await
                .unwrap_err();
            assert_eq!(report.current_context(), &KernelError::Validation);
        }

        let jungle = SessionBookRepository
            .find_by_id(&mut con, &BookId::new(1))
            .await?
            .expect("seeded book");
        let blanked = jungle.clone().reconstruct(|b| b.author = BookAuthor::new(""));
        let report = SessionBookRepository
            .update(&mut con, &blanked)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);

        let all = SessionBookRepository.find_all(&mut con).await?;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], jungle);
        Ok(())
    }

    #[tokio::test]
    async fn missing_id_is_noop() -> error_stack::Result<(), KernelError> {
        let db = SessionDatabase::seeded();
        let mut con = db.transact(&SessionId::generate()).await?;
        let before = SessionBookRepository.find_all(&mut con).await?;

        let ghost = Book::new(
            BookId::new(-99),
            BookTitle::new("Ghost"),
            BookAuthor::new("Nobody"),
            BookDescription::default(),
        );
        SessionBookRepository.update(&mut con, &ghost).await?;
        SessionBookRepository.delete(&mut con, ghost.id()).await?;

        assert_eq!(SessionBookRepository.find_all(&mut con).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reissued() -> error_stack::Result<(), KernelError> {
        let db = SessionDatabase::seeded();
        let mut con = db.transact(&SessionId::generate()).await?;

        SessionBookRepository
            .delete(&mut con, &BookId::new(3))
            .await?;
        let mut book = pending("Neuromancer", "W. Gibson", "");
        SessionBookRepository.create(&mut con, &mut book).await?;
        assert_eq!(book.id(), &BookId::new(4));

        let all = SessionBookRepository.find_all(&mut con).await?;
        assert!(all.windows(2).all(|w| w[0].id() < w[1].id()));
        Ok(())
    }

    #[tokio::test]
    async fn sessions_do_not_share_books() -> error_stack::Result<(), KernelError> {
        let db = SessionDatabase::seeded();
        let (alice, bob) = (SessionId::generate(), SessionId::generate());

        {
            let mut con = db.transact(&alice).await?;
            let mut book = pending("Dune", "F. Herbert", "");
            SessionBookRepository.create(&mut con, &mut book).await?;
        }

        let mut con = db.transact(&bob).await?;
        assert_eq!(SessionBookRepository.find_all(&mut con).await?.len(), 3);
        drop(con);

        let mut con = db.transact(&alice).await?;
        assert_eq!(SessionBookRepository.find_all(&mut con).await?.len(), 4);
        drop(con);

        let mut con = db.transact(&bob).await?;
        assert_eq!(SessionBookRepository.find_all(&mut con).await?.len(), 3);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_evicted() -> error_stack::Result<(), KernelError> {
        let db = SessionDatabase::seeded().with_idle_timeout(Duration::from_secs(60));
        let (stale, active) = (SessionId::generate(), SessionId::generate());

        {
            let mut con = db.transact(&stale).await?;
            SessionBookRepository
                .delete(&mut con, &BookId::new(1))
                .await?;
        }
        drop(db.transact(&active).await?);
        assert_eq!(db.session_count().await, 2);

        tokio::time::advance(Duration::from_secs(40)).await;
        drop(db.transact(&active).await?);
        assert_eq!(db.session_count().await, 2);

        tokio::time::advance(Duration::from_secs(30)).await;
        drop(db.transact(&active).await?);
        assert_eq!(db.session_count().await, 1);

        let mut con = db.transact(&stale).await?;
        assert_eq!(SessionBookRepository.find_all(&mut con).await?.len(), 3);
        drop(con);
        assert_eq!(db.session_count().await, 2);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn cookieless_traffic_does_not_accumulate() -> error_stack::Result<(), KernelError> {
        let db = SessionDatabase::empty().with_idle_timeout(Duration::from_secs(60));

        for _ in 0..300 {
            drop(db.transact(&SessionId::generate()).await?);
            tokio::time::advance(Duration::from_secs(1)).await;
        }

        assert!(db.session_count().await <= 120);
        Ok(())
    }

    #[tokio::test]
    async fn returned_books_are_detached() -> error_stack::Result<(), KernelError> {
        let db = SessionDatabase::seeded();
        let mut con = db.transact(&SessionId::generate()).await?;

        let mut copy = SessionBookRepository.find_all(&mut con).await?;
        copy[0] = copy[0].clone().reconstruct(|b| b.title = BookTitle::new("Changed"));

        let stored = SessionBookRepository
            .find_by_id(&mut con, &BookId::new(1))
            .await?
            .expect("seeded book");
        assert_eq!(stored.title().as_ref(), "Jungle Book");
        Ok(())
    }
}
