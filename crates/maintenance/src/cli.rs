//! Shared plumbing for the maintenance binaries.
//!
//! Each binary parses its own positional arguments into a [`Job`] and hands
//! it to [`execute`], which owns logging, the runtime and the connection.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Args;
use tokio::runtime::Builder;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::MaintenanceError;
use crate::ops::{Job, Report, run_job};
use crate::store::MongoDocumentStore;

/// Environment variable read when `--database-url` is absent.
pub const DATABASE_URL_ENV: &str = "MONGODB_URI";

/// Connection flags common to every maintenance binary.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// MongoDB connection string. Falls back to `MONGODB_URI`.
    #[arg(long = "database-url", value_name = "uri")]
    pub database_url: Option<String>,
    /// Database name. Defaults to the connection string's database, then
    /// `codefolio`.
    #[arg(long, value_name = "name")]
    pub database: Option<String>,
}

/// Pick the connection string from the flag or the environment.
///
/// # Errors
///
/// Returns [`MaintenanceError::EmptyConnectionString`] for a blank value and
/// [`MaintenanceError::MissingConnectionString`] when neither source is set.
pub fn resolve_database_url(explicit: Option<String>) -> Result<String, MaintenanceError> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(MaintenanceError::EmptyConnectionString {
                source_name: "--database-url",
            });
        }
        return Ok(value);
    }

    let from_env = env::var(DATABASE_URL_ENV).map_err(|_| {
        MaintenanceError::MissingConnectionString {
            env: DATABASE_URL_ENV,
        }
    })?;
    if from_env.trim().is_empty() {
        return Err(MaintenanceError::EmptyConnectionString {
            source_name: DATABASE_URL_ENV,
        });
    }
    Ok(from_env)
}

/// Install a JSON `tracing` subscriber on stderr, filtered by `RUST_LOG`.
pub fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

/// Run `job` against the configured database and print its report.
///
/// Returns [`ExitCode::FAILURE`] after logging when anything fails.
#[must_use]
pub fn execute(connection: ConnectionArgs, job: &Job) -> ExitCode {
    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(connect_and_run(connection, job)) {
        Ok(report) => {
            if let Err(err) = writeln!(io::stdout().lock(), "{report}") {
                drop(err);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(
                action = %job.action(),
                collection = %job.collection(),
                error = %e,
                "maintenance job failed"
            );
            if let Err(err) = writeln!(io::stderr().lock(), "{e}") {
                drop(err);
            }
            ExitCode::FAILURE
        }
    }
}

async fn connect_and_run(
    connection: ConnectionArgs,
    job: &Job,
) -> Result<Report, MaintenanceError> {
    let uri = resolve_database_url(connection.database_url)?;
    let store = MongoDocumentStore::connect(&uri, connection.database.as_deref()).await?;
    let outcome = run_job(&store, job).await;
    store.close().await;
    outcome
}

#[cfg(test)]
mod tests {
    //! Unit tests for connection string resolution.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn explicit_connection_string_wins() {
        let _guard = env_lock::lock_env([(DATABASE_URL_ENV, Some("mongodb://env/db"))]);
        assert_eq!(
            resolve_database_url(Some("mongodb://flag/db".to_owned())),
            Ok("mongodb://flag/db".to_owned())
        );
    }

    #[rstest]
    fn environment_supplies_connection_string() {
        let _guard = env_lock::lock_env([(DATABASE_URL_ENV, Some("mongodb://env/db"))]);
        assert_eq!(resolve_database_url(None), Ok("mongodb://env/db".to_owned()));
    }

    #[rstest]
    fn blank_flag_is_rejected() {
        assert_eq!(
            resolve_database_url(Some("   ".to_owned())),
            Err(MaintenanceError::EmptyConnectionString {
                source_name: "--database-url"
            })
        );
    }

    #[rstest]
    fn blank_environment_is_rejected() {
        let _guard = env_lock::lock_env([(DATABASE_URL_ENV, Some(""))]);
        assert_eq!(
            resolve_database_url(None),
            Err(MaintenanceError::EmptyConnectionString {
                source_name: DATABASE_URL_ENV
            })
        );
    }

    #[rstest]
    fn missing_connection_string_is_reported() {
        let _guard = env_lock::lock_env([(DATABASE_URL_ENV, None::<&str>)]);
        assert_eq!(
            resolve_database_url(None),
            Err(MaintenanceError::MissingConnectionString {
                env: DATABASE_URL_ENV
            })
        );
    }
}
