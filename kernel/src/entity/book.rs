mod author;
mod description;
mod id;
mod title;

pub use self::{author::*, description::*, id::*, title::*};
use destructure::Destructure;
use error_stack::Report;
use vodca::References;

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    description: BookDescription,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        description: BookDescription,
    ) -> Self {
        Self {
            id,
            title,
            author,
            description,
        }
    }

    /// A book built from user input that no store has assigned an id to yet.
    pub fn pending(title: BookTitle, author: BookAuthor, description: BookDescription) -> Self {
        Self::new(BookId::pending(), title, author, description)
    }

    /// Title and author must both be non-empty before a book may be written to a store.
    pub fn validate(&self) -> error_stack::Result<(), KernelError> {
        let missing = [
            ("title", self.title.as_ref().is_empty()),
            ("author", self.author.as_ref().is_empty()),
        ]
        .into_iter()
        .filter_map(|(field, empty)| empty.then_some(field))
        .collect::<Vec<_>>();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Report::new(KernelError::Validation)
                .attach_printable(format!("missing required field(s): {}", missing.join(", "))))
        }
    }

    pub fn assign_id(&mut self, id: BookId) {
        self.id = id;
    }
}

#[cfg(test)]
mod test {
    use super::{Book, BookAuthor, BookDescription, BookId, BookTitle};
    use crate::KernelError;

    fn book(title: &str, author: &str) -> Book {
        Book::pending(
            BookTitle::new(title),
            BookAuthor::new(author),
            BookDescription::new("Y"),
        )
    }

    #[test]
    fn validate_required_fields() {
        assert!(book("Dune", "F. Herbert").validate().is_ok());
        for (title, author) in [("", "X"), ("X", ""), ("", "")] {
            let report = book(title, author).validate().unwrap_err();
            assert!(matches!(report.current_context(), KernelError::Validation));
        }
    }

    #[test]
    fn assign_id_keeps_fields() {
        let mut dune = book("Dune", "F. Herbert");
        assert!(dune.id().is_pending());
        dune.assign_id(BookId::new(1));
        assert_eq!(dune.id(), &BookId::new(1));
        assert_eq!(dune.title(), &BookTitle::new("Dune"));
    }
}
