//! Delete every document in one collection.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::process::ExitCode;

use clap::Parser;
use maintenance::cli::{ConnectionArgs, execute, init_tracing};
use maintenance::{CollectionName, Job};

/// `purge-collection` arguments.
#[derive(Debug, Parser)]
#[command(
    name = "purge-collection",
    about = "Delete every document in a collection",
    version
)]
struct CliArgs {
    /// Collection to empty.
    #[arg(value_name = "collection")]
    collection: CollectionName,
    #[command(flatten)]
    connection: ConnectionArgs,
}

fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    execute(
        args.connection,
        &Job::Purge {
            collection: args.collection,
        },
    )
}
