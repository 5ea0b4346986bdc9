use application::service::ShelfService;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, MethodRouter};
use axum::{Form, Router};
use axum_extra::extract::cookie::CookieJar;
use error_stack::Report;
use kernel::KernelError;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{ShelfForm, ShelfQuery, ShelfTransformer};
use crate::response::ShelfPresenter;
use crate::session;

pub trait ShelfRouter {
    fn route_shelf(self) -> Self;
}

impl<D> ShelfRouter for Router<AppModule<D>>
where
    D: ShelfService,
{
    fn route_shelf(self) -> Self {
        let shelf: MethodRouter<AppModule<D>> = get(
            |State(module): State<AppModule<D>>,
             jar: CookieJar,
             query: Result<Query<ShelfQuery>, QueryRejection>| async move {
                let (jar, session) = session::resolve(jar);
                let page = match query {
                    Ok(Query(query)) => {
                        Controller::new(ShelfTransformer, ShelfPresenter)
                            .intake(query)
                            .handle(|request| async move {
                                module.handle_shelf(&session, request).await
                            })
                            .await
                    }
                    Err(rejection) => Err(malformed(rejection.body_text())),
                }
                .map_err(ErrorStatus::from);
                (jar, page)
            },
        )
        .post(
            |State(module): State<AppModule<D>>,
             jar: CookieJar,
             query: Result<Query<ShelfQuery>, QueryRejection>,
             form: Result<Form<ShelfForm>, FormRejection>| async move {
                let (jar, session) = session::resolve(jar);
                let page = match (query, form) {
                    (Ok(Query(query)), Ok(Form(form))) => {
                        Controller::new(ShelfTransformer, ShelfPresenter)
                            .intake((query, form))
                            .handle(|request| async move {
                                module.handle_shelf(&session, request).await
                            })
                            .await
                    }
                    (Err(rejection), _) => Err(malformed(rejection.body_text())),
                    (_, Err(rejection)) => Err(malformed(rejection.body_text())),
                }
                .map_err(ErrorStatus::from);
                (jar, page)
            },
        );
        self.route("/", shelf.clone()).route("/index.php", shelf)
    }
}

/// Requests axum could not decode. The rejection text goes to the log, never the page.
fn malformed(rejection: String) -> Report<KernelError> {
    Report::new(KernelError::InvalidArgument).attach_printable(rejection)
}
