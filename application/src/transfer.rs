mod book;
mod shelf;

pub use self::{book::*, shelf::*};
