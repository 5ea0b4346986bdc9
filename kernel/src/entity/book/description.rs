use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Free text about a book. An empty description is stored as no value at all.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookDescription(Option<String>);

impl BookDescription {
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        if description.is_empty() {
            Self(None)
        } else {
            Self(Some(description))
        }
    }

    pub fn from_nullable(description: Option<String>) -> Self {
        description.map(Self::new).unwrap_or_default()
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}
