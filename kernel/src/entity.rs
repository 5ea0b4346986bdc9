mod book;
mod session;

pub use self::{book::*, session::*};
