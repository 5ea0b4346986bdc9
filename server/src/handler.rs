use std::ops::Deref;
use std::sync::Arc;

/// Shared application state: the book store chosen at startup.
pub struct AppModule<D>(Arc<D>);

impl<D> AppModule<D> {
    pub fn new(database: D) -> Self {
        Self(Arc::new(database))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = D;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}
