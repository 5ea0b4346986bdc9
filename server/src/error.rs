use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use error_stack::Report;
use kernel::KernelError;
use std::process::{ExitCode, Termination};

use crate::view::{ErrorView, View};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// Any failure while handling a request. Rendered as the error page; the report itself
/// only goes to the log.
#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl ErrorStatus {
    fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::InvalidArgument | KernelError::Validation => StatusCode::BAD_REQUEST,
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Storage | KernelError::Construction => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn view(&self) -> ErrorView {
        match self.0.current_context() {
            KernelError::InvalidArgument => {
                ErrorView::new("The request could not be read. Book ids must be numbers.")
            }
            KernelError::Validation => ErrorView::new("A book needs both a title and an author."),
            KernelError::NotFound => ErrorView::new("There is no book with that id."),
            KernelError::Storage | KernelError::Construction => ErrorView::default(),
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        (status, Html(self.view().render())).into_response()
    }
}
