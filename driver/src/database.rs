pub use self::{postgres::*, session::*};

mod postgres;
mod session;
