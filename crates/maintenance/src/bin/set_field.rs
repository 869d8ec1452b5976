//! Set one field to a JSON value across a collection.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::process::ExitCode;

use clap::Parser;
use maintenance::cli::{ConnectionArgs, execute, init_tracing};
use maintenance::{CollectionName, FieldPath, FieldValue, Job};

/// `set-field` arguments.
#[derive(Debug, Parser)]
#[command(
    name = "set-field",
    about = "Set a field to a JSON value on every document in a collection",
    version
)]
struct CliArgs {
    /// Collection to update.
    #[arg(value_name = "collection")]
    collection: CollectionName,
    /// Dotted field path, e.g. `profile.bio`.
    #[arg(value_name = "field")]
    field: FieldPath,
    /// JSON value; quote strings, e.g. '"draft"'.
    #[arg(value_name = "json")]
    value: FieldValue,
    /// Only touch documents that lack the field.
    #[arg(long)]
    only_missing: bool,
    #[command(flatten)]
    connection: ConnectionArgs,
}

fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    execute(
        args.connection,
        &Job::SetField {
            collection: args.collection,
            field: args.field,
            value: args.value,
            only_missing: args.only_missing,
        },
    )
}
