use error_stack::{Report, ResultExt};
use kernel::KernelError;

pub mod config;
pub mod database;
pub(crate) mod error;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .change_context_lazy(|| KernelError::Construction)
        .attach_printable_lazy(|| format!("Failed to read environment variable {key}"))
}

pub(crate) fn env_or(key: &str, default: &str) -> error_stack::Result<String, KernelError> {
    match dotenvy::var(key) {
        Ok(value) => Ok(value),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(default.to_string()),
        Err(e) => Err(Report::new(e)
            .change_context(KernelError::Construction)
            .attach_printable(format!("Failed to read environment variable {key}"))),
    }
}
