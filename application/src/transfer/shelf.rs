use crate::transfer::BookDto;

/// What a single request asks of the shelf.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ShelfRequest {
    /// Show one book. The id is still raw user input.
    Detail { id: String },
    /// Change the shelf, then show the full list.
    Mutate(ShelfOperation),
    List,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ShelfOperation {
    Add {
        title: String,
        author: String,
        description: String,
    },
    Modify {
        id: String,
        title: String,
        author: String,
        description: String,
    },
    Delete {
        id: String,
    },
    /// An operation token nobody handles.
    Unknown(String),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ShelfPage {
    List(Vec<BookDto>),
    Detail(BookDto),
}
