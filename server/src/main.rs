use crate::error::StackTrace;
use crate::handler::AppModule;
use crate::route::ShelfRouter;
use application::service::ShelfService;
use driver::config::{BookshelfConfig, StoreKind};
use driver::database::{PostgresDatabase, SessionDatabase};
use error_stack::ResultExt;
use kernel::KernelError;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod controller;
mod error;
mod handler;
mod request;
mod response;
mod route;
mod session;
mod view;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info"
                            .into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let config = BookshelfConfig::from_env()?;
    tracing::info!(store = ?config.store, bind = %config.bind, "starting bookshelf");

    match config.store {
        StoreKind::Postgres => serve(config.bind, PostgresDatabase::new()?).await?,
        StoreKind::Session => {
            let database = if config.seed {
                SessionDatabase::seeded()
            } else {
                SessionDatabase::empty()
            };
            serve(config.bind, database.with_idle_timeout(config.session_idle)).await?
        }
    }

    Ok(())
}

async fn serve<D>(bind: SocketAddr, database: D) -> error_stack::Result<(), KernelError>
where
    D: ShelfService,
{
    let router = axum::Router::<AppModule<D>>::new()
        .route_shelf()
        .layer(TraceLayer::new_for_http())
        .with_state(AppModule::new(database));

    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Construction)
        .attach_printable_lazy(|| format!("Failed to listen on {bind}"))?;

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Construction)
        .attach_printable("Server stopped unexpectedly")?;

    Ok(())
}
