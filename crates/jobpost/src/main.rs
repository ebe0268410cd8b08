/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! jobpost CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "jobpost")]
#[command(version)]
#[command(about = "Render job posting previews", long_about = None)]
struct Cli {
    /// Verbose logging (-v for debug output)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the jobs and layouts of a data directory
    List {
        /// Data directory containing jobs/index.json and layouts.json
        #[arg(short, long, value_name = "DIR")]
        data: PathBuf,
    },

    /// Render the preview fragment for a set of jobs
    Render {
        /// Data directory containing jobs/index.json and layouts.json
        #[arg(short, long, value_name = "DIR")]
        data: PathBuf,

        /// Job to include (repeatable)
        #[arg(short, long = "job", value_name = "ID", required = true)]
        jobs: Vec<String>,

        /// Layout to use (defaults to the first layout)
        #[arg(short, long, value_name = "ID")]
        layout: Option<String>,

        /// Template file overriding the layout's template
        #[arg(short, long, value_name = "FILE")]
        template: Option<PathBuf>,

        /// Write output to FILE (stdout when omitted)
        #[arg(short, long, value_name = "FILE", conflicts_with = "output_dir")]
        output: Option<PathBuf>,

        /// Write output to DIR under a dated export file name
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Fail when the template produces warnings
        #[arg(long)]
        check: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose > 0 {
        "jobpost=debug"
    } else {
        "jobpost=info"
    };

    // Logs go to stderr so rendered output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::List { data } => commands::list::execute(&data),
        Commands::Render {
            data,
            jobs,
            layout,
            template,
            output,
            output_dir,
            check,
        } => commands::render::execute(commands::render::RenderArgs {
            data,
            jobs,
            layout,
            template,
            output,
            output_dir,
            check,
        }),
    }
}
