use crate::view::{escape, View};

pub static GENERIC_ERROR_MESSAGE: &str = "Something bad happened.";

pub struct ErrorView {
    message: String,
}

impl ErrorView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for ErrorView {
    fn default() -> Self {
        Self::new(GENERIC_ERROR_MESSAGE)
    }
}

impl View for ErrorView {
    fn title(&self) -> &str {
        "Error Page"
    }

    fn content(&self) -> String {
        format!(
            "<p>{}</p><p><a href=\"/\">Back to book list</a></p>",
            escape(&self.message)
        )
    }
}
