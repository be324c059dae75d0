#![doc(html_root_url = "https://docs.rs/escline-core/0.1.0")]
//! Library crate behind the [`escline`](https://github.com/escline/escline) binary.
//!
//! Everything escline does lives here: [`unescape`](crate::unescape) turns
//! backslash notation into raw bytes, [`ansi`] builds the control sequences
//! the session writes, [`cli`] runs the read-decode-echo loop, and
//! [`configs`] loads `config.toml`. The binary only parses arguments and
//! wires these together.
//!
//! The API is shaped for that one consumer; if you want to use it from
//! another crate, expect breakage between minor versions until someone
//! actually needs it to be stable.

pub mod ansi;
pub mod cli;
pub mod configs;
pub mod debug;
pub mod tasks;
pub mod unescape;

mod macros {
    //! Small macros shared across escline's modules.

    /// Creates the directory at the given [`&Path`][std::path::Path], along
    /// with any missing parents, unless it already exists as a directory.
    ///
    /// ## Example
    /// ```
    /// use escline_core::create_recursive;
    /// use std::path::PathBuf;
    /// fn mkdir() {
    ///     let path = PathBuf::from("some/dir");
    ///     create_recursive!(&path);
    ///     assert!(path.is_dir() && path.exists());
    /// }
    /// ```
    #[macro_export]
    macro_rules! create_recursive {
        ($path:expr) => {
            let p: &std::path::Path = $path;
            if !p.is_dir() {
                std::fs::DirBuilder::new()
                    .recursive(true)
                    .create(p)
                    .expect("Recursive mode won't panic");
            }
        };
    }

    /// Wraps a `Result<T, E>` in a [`miette`] diagnostic styled after clap's
    /// own error output: the context message in red, an optional `USAGE:`
    /// block below it, and a "help:" footer that always ends by pointing at
    /// `escline --help`.
    ///
    /// Arguments, in order:
    /// - the fallible expression
    /// - the context message describing what failed
    /// - optional: the usage line clap would print for the command
    /// - optional: `help = ...` with an extra line for the help footer
    ///
    /// ## Example
    /// ```
    /// use crossterm::style::Stylize;
    /// use escline_core::map_miette;
    /// fn returns_err() -> miette::Result<()> {
    ///     let _file = map_miette!(
    ///         std::fs::File::open("/definitely/not/here/transcript.txt"),
    ///         "Failed to open transcript file",
    ///         format!("{} {} [OPTIONS] [HEIGHT] [WIDTH]",
    ///             "USAGE:".bold().underlined(),
    ///             "escline".bold()
    ///         ),
    ///         help = format!(
    ///             "To see the recognized escape notations, try `{}`.",
    ///             "escline list-escapes".bold().cyan()
    ///         )
    ///     )?;
    ///     Ok(())
    /// }
    /// let fn_err = returns_err();
    /// assert!(fn_err.is_err());
    /// ```
    #[macro_export]
    macro_rules! map_miette {
        // Clap-style USAGE: && additional "help" message
        ($expr:expr, $wrap_msg:expr, $usage:expr, help = $add_help:expr) => {
            $expr.map_err(|e| {
                use crossterm::style::Stylize;
                miette::miette!(
                    help = format!("{}\nFor more information, try `escline --help`.", $add_help),
                    "{e}"
                )
                .wrap_err(format!("{}\n\n{}\n", $wrap_msg, $usage).red())
            })
        };

        // Clap-style USAGE: && default "help" message
        ($expr:expr, $wrap_msg:expr, $usage:expr) => {
            $expr.map_err(|e| {
                use crossterm::style::Stylize;
                miette::miette!(help = "For more information, try `escline --help`.", "{e}")
                    .wrap_err(format!("{}\n\n{}\n", $wrap_msg, $usage).red())
            })
        };

        // Additional "help" message
        ($expr:expr, $wrap_msg:expr, help = $add_help:expr) => {
            $expr.map_err(|e| {
                use crossterm::style::Stylize;
                miette::miette!(
                    help = format!("{}\nFor more information, try `escline --help`.", $add_help),
                    "{e}"
                )
                .wrap_err(format!("{}", $wrap_msg).red())
            })
        };

        // Default "help" message
        ($expr:expr, $wrap_msg:expr) => {
            $expr.map_err(|e| {
                use crossterm::style::Stylize;
                miette::miette!(help = "For more information, try `escline --help`.", "{e}")
                    .wrap_err(format!("{}", $wrap_msg).red())
            })
        };
    }
}
