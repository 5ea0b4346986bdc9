use application::transfer::BookDto;

use crate::request::{DEL_OP, MOD_OP, OP_PARAM};
use crate::view::{escape, View};

pub struct DetailView<'a> {
    book: &'a BookDto,
}

impl<'a> DetailView<'a> {
    pub fn new(book: &'a BookDto) -> Self {
        Self { book }
    }

    fn modify_form(&self) -> String {
        format!(
            concat!(
                r#"<form id="modForm" action="/" method="post">"#,
                r#"<input name="{op}" value="{modify}" type="hidden"/>"#,
                r#"<input name="id" value="{id}" type="hidden"/>"#,
                r#"Title:<br/><input name="title" type="text" value="{title}"/><br/>"#,
                r#"Author:<br/><input name="author" type="text" value="{author}"/><br/>"#,
                r#"Description:<br/><input name="description" type="text" value="{description}"/><br/>"#,
                r#"<input type="submit" value="Update book record"/>"#,
                "</form>"
            ),
            op = OP_PARAM,
            modify = MOD_OP,
            id = self.book.id,
            title = escape(&self.book.title),
            author = escape(&self.book.author),
            description = escape(self.book.description.as_deref().unwrap_or_default()),
        )
    }

    fn delete_form(&self) -> String {
        format!(
            concat!(
                r#"<form id="delForm" action="/" method="post">"#,
                r#"<input name="{op}" value="{delete}" type="hidden"/>"#,
                r#"<input name="id" value="{id}" type="hidden"/>"#,
                r#"<input type="submit" value="Delete book record"/>"#,
                "</form>"
            ),
            op = OP_PARAM,
            delete = DEL_OP,
            id = self.book.id,
        )
    }
}

impl View for DetailView<'_> {
    fn title(&self) -> &str {
        "Book Details"
    }

    fn content(&self) -> String {
        format!(
            "<p>ID: {}</p>\n{}\n{}\n<p><a href=\"/\">Back to book list</a></p>",
            self.book.id,
            self.modify_form(),
            self.delete_form()
        )
    }
}
