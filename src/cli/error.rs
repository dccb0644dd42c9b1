//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::App(e) => match e {
                ApplicationError::Domain(domain) => crate::exitcode::for_domain(domain),
                ApplicationError::MalformedRecord { .. }
                | ApplicationError::MalformedTree(_) => crate::exitcode::DATAERR,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { source, .. } => {
                    match source.downcast_ref::<std::io::Error>() {
                        Some(io) if io.kind() == std::io::ErrorKind::NotFound => {
                            crate::exitcode::NOINPUT
                        }
                        Some(_) => crate::exitcode::IOERR,
                        None => crate::exitcode::SOFTWARE,
                    }
                }
            },
        }
    }

    /// What to show the user: the short tag for graph rule violations,
    /// the full message otherwise.
    pub fn report(&self) -> String {
        match self {
            CliError::App(e @ ApplicationError::MalformedRecord { .. }) => {
                format!("{e} (run `famtree clean` to start over)")
            }
            CliError::App(e) => e.short().map(str::to_string).unwrap_or_else(|| e.to_string()),
            other => other.to_string(),
        }
    }
}
