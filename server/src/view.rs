pub use self::{detail::*, error::*, list::*};

mod detail;
mod error;
mod list;

/// A full HTML page.
pub trait View {
    fn title(&self) -> &str;
    fn content(&self) -> String;

    fn render(&self) -> String {
        let title = self.title();
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{}\n</body>\n</html>\n",
            self.content()
        )
    }
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }
    escaped
}
