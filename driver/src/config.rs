use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use error_stack::{Report, ResultExt};
use kernel::KernelError;

use crate::database::DEFAULT_IDLE_TIMEOUT;
use crate::env_or;

static STORE_KIND: &str = "BOOKSHELF_STORE";
static SESSION_SEED: &str = "BOOKSHELF_SEED";
static BIND_ADDRESS: &str = "BOOKSHELF_BIND";
static SESSION_IDLE_SECS: &str = "BOOKSHELF_SESSION_IDLE_SECS";

/// Which book store backs the application.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StoreKind {
    Postgres,
    Session,
}

impl FromStr for StoreKind {
    type Err = Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "db" => Ok(Self::Postgres),
            "session" | "memory" => Ok(Self::Session),
            other => Err(Report::new(KernelError::Construction)
                .attach_printable(format!("Unknown store kind {other:?}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookshelfConfig {
    pub store: StoreKind,
    /// Whether new sessions start with the sample books. Only used by the session store.
    pub seed: bool,
    pub bind: SocketAddr,
    /// How long an unused session shelf is kept. Only used by the session store.
    pub session_idle: Duration,
}

impl BookshelfConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let store = env_or(STORE_KIND, "postgres")?.parse::<StoreKind>()?;
        let seed = parse_flag(&env_or(SESSION_SEED, "true")?)?;
        let bind = env_or(BIND_ADDRESS, "0.0.0.0:8080")?
            .parse::<SocketAddr>()
            .change_context(KernelError::Construction)
            .attach_printable_lazy(|| format!("{BIND_ADDRESS} is not a socket address"))?;
        let session_idle = match env_or(SESSION_IDLE_SECS, "")?.trim() {
            "" => DEFAULT_IDLE_TIMEOUT,
            secs => parse_secs(secs)?,
        };
        Ok(Self {
            store,
            seed,
            bind,
            session_idle,
        })
    }
}

fn parse_secs(value: &str) -> error_stack::Result<Duration, KernelError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Report::new(KernelError::Construction).attach_printable(format!(
            "{SESSION_IDLE_SECS} expects a positive number of seconds, got {value:?}"
        ))),
    }
}

fn parse_flag(value: &str) -> error_stack::Result<bool, KernelError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Report::new(KernelError::Construction)
            .attach_printable(format!("{SESSION_SEED} expects a boolean, got {other:?}"))),
    }
}
