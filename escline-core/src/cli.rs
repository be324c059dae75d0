use std::{
    io::{self, Write},
    path::PathBuf,
};

use crossterm::style::Stylize;
use miette::{Context, IntoDiagnostic};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, event, Level};

use crate::{
    ansi,
    configs::{get_config, Config},
    create_recursive,
    debug::run_debug_output,
    tasks::run_file_output,
    unescape::{unescape, ESCAPES},
};

/// The smallest drawing region that still fits the divider row, the prompt
/// row, and at least one row of decoded output above them.
pub const MIN_DIMENSION: u16 = 3;

/// Options for [`interactive_session`], assembled by the `escline` binary
/// from CLI arguments and the terminal size.
#[derive(Debug)]
pub struct SessionOptions {
    pub height: u16,
    pub width: u16,
    /// Transcript file for the decoded output, resolved against the
    /// configured out-dir when relative.
    pub file: Option<PathBuf>,
    pub debug: bool,
}

/// Runs the read-decode-echo loop until stdin reaches end of input.
///
/// The screen is drawn once up front (clear, home, saved cursor, divider
/// row, prompt row); afterwards each line read from stdin is decoded with
/// [`unescape`] and its raw bytes are written at the saved cursor position,
/// so control sequences take effect above the input region.
///
/// # Errors
/// Errors if stdin or stdout fail; decoding itself cannot fail.
pub async fn interactive_session(opts: SessionOptions) -> miette::Result<()> {
    let config = get_config();
    let mut stdout = io::stdout();

    let (decoded_tx, _) = tokio::sync::broadcast::channel::<Vec<u8>>(64);
    let mut tasks = tokio::task::JoinSet::new();

    if let Some(path) = &opts.file {
        let default_out_dir = &config.defaults.out_dir;

        let file_path = if path.is_absolute() {
            let parent = path.parent().unwrap_or(default_out_dir);
            create_recursive!(parent);
            path.clone()
        } else {
            let joined_path = default_out_dir.join(path);
            let parent_path = joined_path.parent().expect("Does not have root");
            create_recursive!(parent_path);
            joined_path
        };

        tasks.spawn(run_file_output(decoded_tx.subscribe(), file_path));
    }

    if opts.debug {
        tasks.spawn(run_debug_output(decoded_tx.subscribe()));
    }

    draw_screen(&mut stdout, &opts, config)
        .into_diagnostic()
        .wrap_err("Failed to draw the initial screen.".red())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines
            .next_line()
            .await
            .into_diagnostic()
            .wrap_err("Failed to read a line from stdin.".red())?
        else {
            break;
        };

        let decoded = unescape(line.as_bytes());
        debug!("Decoded {} input bytes into {} bytes", line.len(), decoded.len());

        if decoded_tx.receiver_count() > 0 {
            let _ = decoded_tx.send(decoded.clone());
        }

        echo_decoded(&mut stdout, &decoded)
            .into_diagnostic()
            .wrap_err("Failed to write to stdout.".red())?;
        draw_input_region(&mut stdout, &opts, config)
            .into_diagnostic()
            .wrap_err("Failed to write to stdout.".red())?;
    }

    event!(Level::TRACE, "stdin closed, waiting on writer tasks");
    drop(decoded_tx);
    tasks.join_all().await;

    // Leave the cursor below the input region on the way out.
    write!(stdout, "{}", ansi::move_cursor(opts.height, 1))
        .into_diagnostic()
        .wrap_err("Failed to write to stdout.".red())?;
    Ok(())
}

fn draw_screen(stdout: &mut io::Stdout, opts: &SessionOptions, config: &Config) -> io::Result<()> {
    write!(
        stdout,
        "{}{}{}",
        ansi::clear_screen(),
        ansi::move_cursor(0, 0),
        ansi::save_cursor()
    )?;
    draw_input_region(stdout, opts, config)
}

fn echo_decoded(stdout: &mut io::Stdout, decoded: &[u8]) -> io::Result<()> {
    write!(stdout, "{}", ansi::load_cursor())?;
    stdout.write_all(decoded)?;
    write!(stdout, "{}", ansi::save_cursor())
}

fn draw_input_region(
    stdout: &mut io::Stdout,
    opts: &SessionOptions,
    config: &Config,
) -> io::Result<()> {
    let divider = config
        .appearance
        .divider
        .to_string()
        .repeat(opts.width as usize);
    write!(
        stdout,
        "{}{}",
        ansi::move_cursor(opts.height.saturating_sub(2), 1),
        divider
    )?;
    write!(
        stdout,
        "{}{}{}",
        ansi::move_cursor(opts.height.saturating_sub(1), 1),
        ansi::clear_screen_from_cursor(),
        config.appearance.prompt
    )?;
    stdout.flush()
}

/// Prints the escape notations [`unescape`] recognizes.
///
/// # Errors
/// Errors if stdout fails.
pub fn list_escapes() -> miette::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "Recognized escapes:\r\n")
        .into_diagnostic()
        .wrap_err("Failed to write to stdout.".red())?;
    for (notation, meaning) in ESCAPES {
        write!(stdout, "{notation:<8} {meaning}\r\n")
            .into_diagnostic()
            .wrap_err("Failed to write to stdout.".red())?;
    }
    Ok(())
}

/// Clap value-parser for the HEIGHT and WIDTH arguments.
///
/// # Errors
/// Errors if the input is not a number or is smaller than [`MIN_DIMENSION`].
pub fn valid_dimension(s: &str) -> Result<u16, String> {
    let dim: u16 = s
        .parse()
        .map_err(|_| format!("`{s}` isn't a valid dimension"))?;
    if dim >= MIN_DIMENSION {
        Ok(dim)
    } else {
        Err(format!(
            "'{dim}' is too small; the drawing region needs at least {MIN_DIMENSION} rows and columns"
        ))
    }
}

/// Clap value-parser for the `--out-dir` override.
///
/// # Errors
/// Errors if the path doesn't exist or is not a directory.
pub fn valid_out_dir(input: &str) -> Result<PathBuf, String> {
    let p = PathBuf::from(input);
    if !p.exists() || !p.is_dir() {
        return Err(format!(
            "Invalid directory '{input}'\nEither does not exist or is not a directory"
        ));
    }
    Ok(p)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dimension_parser_accepts_sane_sizes() {
        assert_eq!(valid_dimension("24"), Ok(24));
        assert_eq!(valid_dimension("3"), Ok(3));
    }

    #[test]
    fn dimension_parser_rejects_garbage_and_tiny_regions() {
        assert!(valid_dimension("abc").is_err());
        assert!(valid_dimension("-1").is_err());
        assert!(valid_dimension("2").is_err());
        assert!(valid_dimension("0").is_err());
    }

    #[test]
    fn out_dir_parser_checks_for_a_directory() {
        assert_eq!(valid_out_dir("."), Ok(PathBuf::from(".")));
        assert!(valid_out_dir("/definitely/not/here").is_err());
    }

    #[test]
    fn map_miette_wraps_errors_with_usage_context() {
        let wrapped: miette::Result<std::fs::File> = crate::map_miette!(
            std::fs::File::open("/definitely/not/here/transcript.txt"),
            "Failed to open transcript file",
            "[OPTIONS] [HEIGHT] [WIDTH]"
        );
        let report = wrapped.expect_err("open cannot succeed");
        assert!(format!("{report}").contains("Failed to open transcript file"));
    }
}
