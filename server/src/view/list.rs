use application::transfer::BookDto;

use crate::request::{ADD_OP, OP_PARAM};
use crate::view::{escape, View};

pub struct ListView<'a> {
    books: &'a [BookDto],
}

impl<'a> ListView<'a> {
    pub fn new(books: &'a [BookDto]) -> Self {
        Self { books }
    }

    fn add_form(&self) -> String {
        format!(
            concat!(
                r#"<form id="addForm" action="/" method="post">"#,
                r#"<input name="{op}" value="{add}" type="hidden"/>"#,
                r#"Title:<br/><input name="title" type="text" value=""/><br/>"#,
                r#"Author:<br/><input name="author" type="text" value=""/><br/>"#,
                r#"Description:<br/><input name="description" type="text" value=""/><br/>"#,
                r#"<input type="submit" value="Add new book"/>"#,
                "</form>"
            ),
            op = OP_PARAM,
            add = ADD_OP,
        )
    }
}

impl View for ListView<'_> {
    fn title(&self) -> &str {
        "Book Collection"
    }

    fn content(&self) -> String {
        let mut content = String::from(concat!(
            "<h2>Current Titles</h2>\n",
            "<table id=\"bookList\">\n",
            "<thead>\n<tr><td>ID</td><td>Title</td><td>Author</td><td>Description</td></tr>\n</thead>\n",
            "<tbody>\n",
        ));
        for book in self.books {
            content.push_str(&format!(
                r#"<tr id="book{id}"><td><a href="/?id={id}">{id}</a></td><td>{title}</td><td>{author}</td><td>{description}</td></tr>"#,
                id = book.id,
                title = escape(&book.title),
                author = escape(&book.author),
                description = escape(book.description.as_deref().unwrap_or_default()),
            ));
            content.push('\n');
        }
        content.push_str("</tbody>\n</table>\n<h2>New Titles</h2>\n");
        content.push_str(&self.add_form());
        content
    }
}
