use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    /// An id that is not a number.
    InvalidArgument,
    /// A required book field is empty.
    Validation,
    /// No book exists for the requested id.
    NotFound,
    /// The storage medium failed to run a statement.
    Storage,
    /// A store, or the connection a request needs, could not be set up.
    Construction,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InvalidArgument => write!(f, "Invalid argument"),
            KernelError::Validation => write!(f, "Validation failed"),
            KernelError::NotFound => write!(f, "Book not found"),
            KernelError::Storage => write!(f, "Storage failure"),
            KernelError::Construction => write!(f, "Store construction failed"),
        }
    }
}

impl Context for KernelError {}
