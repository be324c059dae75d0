//! Escline is an interactive CLI tool for previewing backslash-escape
//! notation in the terminal.
//!
//! Each line typed at the prompt is decoded (`\n`, `\t`, `\xHH`, `\uHHHH`,
//! ...) and the raw bytes are written to a region at the top of the screen,
//! so the effect of control sequences can be observed live. A divider row
//! separates that region from the prompt. In the future, escline plans to
//! allow saving annotated transcripts and replaying them at a chosen pace.

use clap::{CommandFactory, Parser, Subcommand};
use crossterm::style::Stylize;
use escline_core::{
    cli::{interactive_session, list_escapes, valid_dimension, valid_out_dir, SessionOptions},
    configs::{initialize_config, ConfigOverride},
    map_miette,
};
use miette::{Context, IntoDiagnostic};
use std::path::PathBuf;
use tracing::{event, Level};

#[derive(Parser)]
#[command(name = "escline", version, about, long_about = None)]
#[command(next_line_help = true)]
#[command(propagate_version = true)]
struct Cli {
    /// Height of the drawing region in rows.
    ///
    /// Must be given together with WIDTH. Defaults to the current
    /// terminal height.
    #[arg(value_parser = valid_dimension)]
    height: Option<u16>,
    /// Width of the divider row in columns.
    ///
    /// Must be given together with HEIGHT. Defaults to the current
    /// terminal width.
    #[arg(value_parser = valid_dimension)]
    width: Option<u16>,
    /// Path to a file for a transcript of the decoded output.
    #[arg(short, long)]
    file: Option<String>,
    /// Prompt text, overriding the config file.
    #[arg(short, long)]
    prompt: Option<String>,
    /// Directory where transcript files are created, overriding the config file.
    #[arg(short, long, value_parser = valid_out_dir)]
    out_dir: Option<PathBuf>,
    /// Display debug output
    #[arg(short, long)]
    debug: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists the recognized escape notations
    ListEscapes,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // The guard must outlive the session or the appender stops draining.
    let _guard = if cli.debug {
        let file = map_miette!(
            std::fs::File::options()
                .write(true)
                .create(true)
                .truncate(true)
                .open("./tracing.txt"),
            "Failed to open './tracing.txt' for tracing output"
        )?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(non_blocking)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .into_diagnostic()
            .wrap_err("Failed to set subscriber")?;
        Some(guard)
    } else {
        None
    };

    if let Some(cmd) = cli.command {
        match cmd {
            Commands::ListEscapes => list_escapes()?,
        }
        return Ok(());
    }

    let (height, width) = match (cli.height, cli.width) {
        (Some(height), Some(width)) => (height, width),
        (None, None) => {
            let (width, height) = map_miette!(
                crossterm::terminal::size(),
                "Failed to query the terminal size.",
                format!(
                    "{} {} [OPTIONS] [HEIGHT] [WIDTH]",
                    "USAGE:".bold().underlined(),
                    "escline".bold()
                ),
                help = "Pass HEIGHT and WIDTH explicitly when stdout is not a terminal."
            )?;
            (height, width)
        }
        _ => {
            let mut cmd = Cli::command();
            cmd.error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "HEIGHT and WIDTH must be given together.",
            )
            .exit();
        }
    };

    initialize_config(ConfigOverride {
        prompt: cli.prompt,
        out_dir: cli.out_dir,
    })?;

    event!(Level::TRACE, "starting interactive session");
    interactive_session(SessionOptions {
        height,
        width,
        file: cli.file.map(PathBuf::from),
        debug: cli.debug,
    })
    .await?;
    Ok(())
}
