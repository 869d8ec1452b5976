//! Delete one document by its ObjectId.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::process::ExitCode;

use clap::Parser;
use maintenance::cli::{ConnectionArgs, execute, init_tracing};
use maintenance::{CollectionName, DocumentId, Job};

/// `delete-document` arguments.
#[derive(Debug, Parser)]
#[command(
    name = "delete-document",
    about = "Delete one document by its 24-character hex ObjectId",
    version
)]
struct CliArgs {
    /// Collection holding the document.
    #[arg(value_name = "collection")]
    collection: CollectionName,
    /// `_id` of the document.
    #[arg(value_name = "id")]
    id: DocumentId,
    #[command(flatten)]
    connection: ConnectionArgs,
}

fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    execute(
        args.connection,
        &Job::Delete {
            collection: args.collection,
            id: args.id,
        },
    )
}
