// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod error;
mod extractor;
mod formatter;
mod generate_docs;
mod home_path;
mod template;
mod yaml_tree;

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{error::Error, generate_docs::generate_docs, home_path::expand_home};

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));
    run(&matches)
}

fn cli() -> Command {
    Command::new("tmpldoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Documents the parameters of a pipeline template as a table")
        .arg(
            Arg::new("template")
                .value_name("TEMPLATE")
                .required(true)
                .help("Path to the template file"),
        )
        .arg(
            Arg::new("output-file")
                .short('o')
                .long("output-file")
                .value_name("PATH")
                .help("Write the table to this file instead of stdout"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let template = matches
        .get_one::<String>("template")
        .context("missing template path")?;
    let template_path = expand_home(template);

    let input = fs::read(&template_path).map_err(|source| Error::Read {
        path: template_path.clone(),
        source,
    })?;

    // Render fully before touching the destination so a bad template leaves no partial table.
    let mut table = Vec::new();
    let count = generate_docs(&template_path.display().to_string(), &input, &mut table)?;

    match matches.get_one::<String>("output-file") {
        Some(output_file) => {
            let output_path = expand_home(output_file);
            write_file(&output_path, &table)?;
            info!(count, path = %output_path.display(), "wrote parameter table");
        }
        None => {
            write_table(&mut io::stdout().lock(), &table)?;
            info!(count, "wrote parameter table to stdout");
        }
    }

    Ok(())
}

fn write_table(writer: &mut impl Write, table: &[u8]) -> Result<(), Error> {
    writer
        .write_all(table)
        .and_then(|_| writer.flush())
        .map_err(Error::Write)
}

fn write_file(path: &Path, table: &[u8]) -> anyhow::Result<()> {
    fs::write(path, table)
        .map_err(Error::Write)
        .with_context(|| format!("cannot write output file '{}'", path.display()))
}
