// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for dox2html.
//!
//! This binary provides the `dox2html` command for converting a single
//! Doxygen-generated XML class description into a styled HTML
//! documentation page.

use dox2html::{parser, renderer};
use lexopt::prelude::*;
use snafu::{OptionExt, prelude::*};
use std::path::{Path, PathBuf};

/// Where to write the rendered page.
#[derive(Clone)]
enum OutputTarget {
    /// Write to the given path. Directories get a file name derived from
    /// the input file stem.
    Path(PathBuf),
    /// Write to stdout.
    Stdout,
}

#[allow(clippy::struct_excessive_bools)]
struct Cli {
    input: PathBuf,
    output: OutputTarget,
    template: Option<PathBuf>,
    project: String,
    show_timestamp: bool,
    quiet: bool,
    dry_run: bool,
    force: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("failed to create output directory: {source}"))]
    CreateOutputDir { source: std::io::Error },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse {}: {source}", path.display()))]
    ParseFile {
        path: PathBuf,
        source: parser::ParseError,
    },

    #[snafu(display("failed to render {}: {source}", path.display()))]
    RenderFile {
        path: PathBuf,
        source: renderer::RenderError,
    },

    #[snafu(display("invalid input filename: no file stem"))]
    InvalidFilename,

    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn print_help() {
    println!(
        "\
{name} {version}
Convert Doxygen XML class descriptions to HTML documentation pages

Usage: {name} [OPTIONS] -o <OUTPUT> <INPUT>

Arguments:
  <INPUT>  Doxygen XML file describing a single compound (class)

Options:
  -o, --output <OUTPUT>    Output file, directory, or - for stdout
  -t, --template <FILE>    HTML page template (default: built-in template)
      --project <NAME>     Project name prefixed to the page title
      --timestamp          Append a generation timestamp to the page
      --no-timestamp       Omit the generation timestamp (default)
  -q, --quiet              Suppress progress messages
  -n, --dry-run            Show what would be written without writing
  -f, --force              Overwrite an existing output file
  -h, --help               Print help
  -V, --version            Print version",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    );
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    // Show help if no arguments provided
    if std::env::args().len() == 1 {
        print_help();
        std::process::exit(0);
    }

    let mut input: Option<PathBuf> = None;
    let mut output: Option<OutputTarget> = None;
    let mut template: Option<PathBuf> = None;
    let mut project = String::new();
    let mut show_timestamp = false;
    let mut quiet = false;
    let mut dry_run = false;
    let mut force = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('o') | Long("output") => {
                let val: PathBuf = parser.value()?.parse()?;
                output = Some(if val == Path::new("-") {
                    OutputTarget::Stdout
                } else {
                    OutputTarget::Path(val)
                });
            }
            Short('t') | Long("template") => template = Some(parser.value()?.parse()?),
            Long("project") => project = parser.value()?.string()?,
            // Show/hide flags - last one wins
            Long("timestamp") => show_timestamp = true,
            Long("no-timestamp") => show_timestamp = false,
            Short('q') | Long("quiet") => quiet = true,
            Short('n') | Long("dry-run") => dry_run = true,
            Short('f') | Long("force") => force = true,
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            Value(val) if input.is_none() => input = Some(val.parse()?),
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Cli {
        input: input.ok_or("missing required argument: <INPUT>")?,
        output: output.ok_or("missing required option: --output")?,
        template,
        project,
        show_timestamp,
        quiet,
        dry_run,
        force,
    })
}

fn main() -> Result<(), Error> {
    let cli = parse_args().context(ParseArgsSnafu)?;

    let template = match &cli.template {
        Some(path) => std::fs::read_to_string(path).context(ReadFileSnafu { path })?,
        None => renderer::DEFAULT_TEMPLATE.to_owned(),
    };

    let opts = renderer::RenderOptions {
        project: cli.project.clone(),
        show_timestamp: cli.show_timestamp,
    };

    match &cli.output {
        OutputTarget::Stdout => process_to_stdout(&cli, &template, &opts),
        OutputTarget::Path(path) => process_file(&cli, path, &template, &opts),
    }
}

/// Reads, parses, and renders the input file into a finished page.
fn render_input(
    input: &Path,
    template: &str,
    opts: &renderer::RenderOptions,
) -> Result<String, Error> {
    let xml = std::fs::read_to_string(input).context(ReadFileSnafu { path: input })?;
    let compound = parser::parse_compound(&xml).context(ParseFileSnafu { path: input })?;
    renderer::render_page(&compound, template, opts).context(RenderFileSnafu { path: input })
}

/// Processes the input file and outputs to stdout.
fn process_to_stdout(cli: &Cli, template: &str, opts: &renderer::RenderOptions) -> Result<(), Error> {
    if cli.dry_run {
        eprintln!("Would output {}", cli.input.display());
        return Ok(());
    }

    let page = render_input(&cli.input, template, opts)?;
    print!("{page}");
    Ok(())
}

/// Processes the input file and writes to the output path.
fn process_file(
    cli: &Cli,
    output: &Path,
    template: &str,
    opts: &renderer::RenderOptions,
) -> Result<(), Error> {
    let out_path = if output.is_dir() {
        let stem = cli.input.file_stem().context(InvalidFilenameSnafu)?;
        output.join(format!("{}.html", stem.to_string_lossy()))
    } else {
        output.to_path_buf()
    };

    // Handle dry-run mode
    if cli.dry_run {
        eprintln!("Would write {}", out_path.display());
        return Ok(());
    }

    // Check if output exists and handle overwrite
    if out_path.exists() && !cli.force {
        eprintln!(
            "Skipping {} (already exists, use --force to overwrite)",
            out_path.display()
        );
        return Ok(());
    }

    // Create parent directory if needed
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).context(CreateOutputDirSnafu)?;
    }

    let page = render_input(&cli.input, template, opts)?;
    std::fs::write(&out_path, &page).context(WriteFileSnafu { path: &out_path })?;

    if !cli.quiet {
        eprintln!("Wrote {}", out_path.display());
    }
    Ok(())
}
