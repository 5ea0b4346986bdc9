use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::update::DependOnBookStore;
use kernel::prelude::entity::{Book, BookAuthor, BookDescription, BookId, BookTitle, SessionId};
use kernel::KernelError;

pub use self::book::*;

mod book;

/// How long a session may go without a request before its shelf is dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Book store that keeps a private, in-memory shelf for every session.
///
/// A shelf lives until its session has been idle for the configured timeout. Idle shelves are
/// swept from `transact`, at most once per timeout period, so a stale shelf is gone within
/// twice the timeout.
pub struct SessionDatabase {
    sessions: Mutex<Sessions>,
    seed: bool,
    idle_timeout: Duration,
}

struct Sessions {
    shelves: HashMap<SessionId, SessionEntry>,
    last_sweep: Instant,
}

struct SessionEntry {
    shelf: Arc<Mutex<SessionShelf>>,
    last_seen: Instant,
}

impl Sessions {
    fn new() -> Self {
        Self {
            shelves: HashMap::new(),
            last_sweep: Instant::now(),
        }
    }

    fn sweep(&mut self, now: Instant, idle_timeout: Duration) {
        if now.duration_since(self.last_sweep) < idle_timeout {
            return;
        }
        let before = self.shelves.len();
        self.shelves
            .retain(|_, entry| now.duration_since(entry.last_seen) < idle_timeout);
        self.last_sweep = now;
        let evicted = before - self.shelves.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.shelves.len(), "idle session shelves dropped");
        }
    }
}

impl SessionDatabase {
    /// New sessions start with the sample books.
    pub fn seeded() -> Self {
        Self {
            sessions: Mutex::new(Sessions::new()),
            seed: true,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// New sessions start with an empty shelf.
    pub fn empty() -> Self {
        Self {
            sessions: Mutex::new(Sessions::new()),
            seed: false,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(self, idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            ..self
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.shelves.len()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for SessionDatabase {
    type Connection = SessionConnection;
    async fn transact(
        &self,
        session: &SessionId,
    ) -> error_stack::Result<Self::Connection, KernelError> {
        let shelf = {
            let now = Instant::now();
            let mut sessions = self.sessions.lock().await;
            sessions.sweep(now, self.idle_timeout);
            let seed = self.seed;
            let entry = sessions.shelves.entry(*session).or_insert_with(|| {
                tracing::debug!(%session, seed, "session shelf created");
                let shelf = if seed {
                    SessionShelf::seeded()
                } else {
                    SessionShelf::default()
                };
                SessionEntry {
                    shelf: Arc::new(Mutex::new(shelf)),
                    last_seen: now,
                }
            });
            entry.last_seen = now;
            Arc::clone(&entry.shelf)
        };
        Ok(SessionConnection(shelf.lock_owned().await))
    }
}

impl DependOnBookStore for SessionDatabase {
    type BookStore = SessionBookRepository;
    fn book_store(&self) -> &Self::BookStore {
        &SessionBookRepository
    }
}

/// The books of one session, kept in ascending id order.
#[derive(Debug)]
pub struct SessionShelf {
    books: Vec<Book>,
    next_id: i64,
}

impl Default for SessionShelf {
    fn default() -> Self {
        Self {
            books: Vec::new(),
            next_id: 1,
        }
    }
}

impl SessionShelf {
    pub fn seeded() -> Self {
        let sample = |id: i64, title: &str, author: &str, description: &str| {
            Book::new(
                BookId::new(id),
                BookTitle::new(title),
                BookAuthor::new(author),
                BookDescription::new(description),
            )
        };
        let books = vec![
            sample(1, "Jungle Book", "R. Kipling", "A classic book."),
            sample(2, "Moonwalker", "J. Walker", ""),
            sample(3, "PHP for Dummies", "J. Valade", "Some smart gal."),
        ];
        Self::with_books(books)
    }

    /// Ids keep counting from the largest one present and are never handed out twice.
    pub fn with_books(mut books: Vec<Book>) -> Self {
        books.sort_by_key(|book| *book.id());
        let next_id = books
            .iter()
            .map(|book| *book.id().as_ref())
            .max()
            .map_or(1, |max| max.max(0) + 1);
        Self { books, next_id }
    }

    fn issue_id(&mut self) -> BookId {
        let id = BookId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn position(&self, id: &BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id() == id)
    }
}

/// Exclusive hold on one session's shelf for the length of a request.
pub struct SessionConnection(OwnedMutexGuard<SessionShelf>);

impl Deref for SessionConnection {
    type Target = SessionShelf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SessionConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
