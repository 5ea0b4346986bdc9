use application::transfer::ShelfPage;
use axum::response::Html;

use crate::controller::Exhaust;
use crate::view::{DetailView, ListView, View};

pub struct ShelfPresenter;

impl Exhaust<ShelfPage> for ShelfPresenter {
    type To = Html<String>;
    fn emit(&self, input: ShelfPage) -> Self::To {
        match input {
            ShelfPage::List(books) => Html(ListView::new(&books).render()),
            ShelfPage::Detail(book) => Html(DetailView::new(&book).render()),
        }
    }
}
