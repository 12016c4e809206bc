use std::path::PathBuf;

use clap::{ArgGroup, CommandFactory, Parser, ValueEnum, error::ErrorKind};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser, Debug)]
#[command(version, about)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "library"])))]
pub struct CliArgs {
    /// Import library to inspect
    #[arg(value_name = "file", value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Search the library paths for the import library instead
    #[arg(id = "library", short, long, value_name = "libname")]
    pub library: Option<String>,

    /// Add the directory to the library search path
    #[arg(
        id = "library-path",
        short = 'L',
        long,
        value_name = "directory",
        value_hint = clap::ValueHint::DirPath
    )]
    pub library_paths: Vec<PathBuf>,

    /// Fail on malformed archive members instead of stopping the search
    #[arg(long)]
    pub strict: bool,

    /// Print colored output
    #[arg(long, value_name = "color", default_value_t = ColorOption::Auto)]
    pub color: ColorOption,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorOption {
    #[value(name = "never")]
    Never,

    #[value(name = "auto")]
    Auto,

    #[value(name = "always")]
    Always,

    #[value(name = "ansi")]
    AlwaysAnsi,
}

impl std::fmt::Display for ColorOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(v) = self.to_possible_value() {
            write!(f, "{}", v.get_name())?;
        }

        Ok(())
    }
}

impl From<ColorOption> for termcolor::ColorChoice {
    fn from(val: ColorOption) -> Self {
        match val {
            ColorOption::Never => termcolor::ColorChoice::Never,
            ColorOption::Auto => termcolor::ColorChoice::Auto,
            ColorOption::Always => termcolor::ColorChoice::Always,
            ColorOption::AlwaysAnsi => termcolor::ColorChoice::AlwaysAnsi,
        }
    }
}

/// Parses the command line arguments into the [`CliArgs`].
pub fn parse_arguments() -> anyhow::Result<CliArgs> {
    let args_os = argfile::expand_args_from(
        std::env::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )
    .unwrap_or_else(|e| CliArgs::command().error(ErrorKind::Io, e).exit());

    let args = CliArgs::parse_from(args_os);

    crate::logging::setup_logger(&args)?;

    Ok(args)
}
