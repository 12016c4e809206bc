use std::io::Write;

use anyhow::{Result, anyhow, bail};
use arguments::CliArgs;
use log::{debug, error, info};

use dllname::{
    importlib::{self, ScanOptions},
    libsearch::{FoundLibrary, LibrarySearcher},
};

mod arguments;
mod logging;

/// cli entrypoint
fn main() {
    if let Err(e) = try_main() {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Main program entrypoint
fn try_main() -> Result<()> {
    let mut args = arguments::parse_arguments()?;
    let library = open_input(&mut args)?;

    let options = ScanOptions {
        strict: args.strict,
    };

    let found = importlib::scan(&library.data, options)
        .map_err(|e| anyhow!("{}: {e}", library.path.display()))?;

    match found {
        Some(found) => {
            info!(
                "{}: {} imports {} ({:?}) from {}",
                library.path.display(),
                found.member().name().escape_ascii(),
                found.symbol().unwrap_or("<unterminated>"),
                found.architecture(),
                found.dll()
            );

            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", found.dll())
                .map_err(|e| anyhow!("could not write output: {e}"))?;
        }
        None => {
            debug!("{}: no short import members found", library.path.display());
        }
    }

    Ok(())
}

/// Reads the import library named on the command line.
fn open_input(args: &mut CliArgs) -> Result<FoundLibrary> {
    if let Some(path) = args.file.take() {
        let data =
            std::fs::read(&path).map_err(|e| anyhow!("could not open {}: {e}", path.display()))?;
        return Ok(FoundLibrary { path, data });
    }

    let Some(name) = args.library.take() else {
        bail!("no input file");
    };

    let mut library_searcher = LibrarySearcher::new();
    library_searcher.extend_search_paths(std::mem::take(&mut args.library_paths));

    if cfg!(windows) {
        if let Some(libenv) = std::env::var_os("LIB") {
            library_searcher.extend_search_paths(std::env::split_paths(&libenv));
        }
    }

    Ok(library_searcher.find_library(name)?)
}
