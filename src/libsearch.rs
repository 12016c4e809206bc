use std::{borrow::Cow, io::ErrorKind, path::PathBuf};

use indexmap::IndexSet;
use log::debug;

#[derive(Debug, thiserror::Error)]
pub enum LibsearchError {
    #[error("unable to find library -l{0}")]
    NotFound(String),

    #[error("could not open import library {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
}

/// A search library name
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct SearchLibraryName<'a>(&'a str);

impl<'a> SearchLibraryName<'a> {
    pub fn value(&self) -> &'a str {
        self.0.trim_start_matches(':')
    }

    /// Returns `true` if the name is a `:filename` used verbatim.
    pub fn is_filename(&self) -> bool {
        self.0.starts_with(':')
    }

    /// Returns the file names to try for this library, in search order.
    pub fn candidates(&self) -> Vec<Cow<'a, str>> {
        if self.is_filename() {
            return vec![Cow::Borrowed(self.value())];
        }

        let name = self.value();
        vec![
            format!("{name}.lib").into(),
            format!("lib{name}.lib").into(),
            format!("lib{name}.dll.a").into(),
            format!("{name}.dll.a").into(),
            format!("lib{name}.a").into(),
            format!("{name}.a").into(),
        ]
    }
}

impl<'a> From<&'a str> for SearchLibraryName<'a> {
    fn from(value: &'a str) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for SearchLibraryName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An import library read in by the [`LibrarySearcher`].
#[derive(Debug)]
pub struct FoundLibrary {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

/// Used for finding import libraries by name.
#[derive(Debug, Default)]
pub struct LibrarySearcher {
    search_paths: IndexSet<PathBuf>,
}

impl LibrarySearcher {
    pub fn new() -> LibrarySearcher {
        Default::default()
    }

    pub fn extend_search_paths<I, P>(&mut self, search_paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths
            .extend(search_paths.into_iter().map(|v| v.into()));
    }

    /// Reads the first library file matching `name` from the search paths.
    pub fn find_library(&self, name: impl AsRef<str>) -> Result<FoundLibrary, LibsearchError> {
        let library = SearchLibraryName::from(name.as_ref());
        let library_filenames = library.candidates();

        for search_path in &self.search_paths {
            for filename in &library_filenames {
                let full_path = search_path.join(filename.as_ref());
                match std::fs::read(&full_path) {
                    Ok(data) => {
                        debug!("found library {library} at {}", full_path.display());
                        return Ok(FoundLibrary {
                            path: full_path,
                            data,
                        });
                    }
                    Err(e) if e.kind() != ErrorKind::NotFound => {
                        return Err(LibsearchError::Io {
                            path: full_path,
                            error: e,
                        });
                    }
                    Err(e) => {
                        debug!("attempt to open {} failed ({})", full_path.display(), e);
                    }
                };
            }
        }

        Err(LibsearchError::NotFound(name.as_ref().to_string()))
    }
}
