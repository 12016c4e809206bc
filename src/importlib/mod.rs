//! Finding the DLL named by the short import members of a COFF import
//! library.

use log::{debug, trace};
use object::{Architecture, LittleEndian};

pub use descriptor::ShortImportDescriptor;
pub use error::*;
pub use member::{ArchiveEnd, ArchiveMember, ArchiveMemberIterator};
pub use strings::read_ascii_string;

mod descriptor;
pub mod error;
mod member;
mod strings;

/// Options for [`scan`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Report a malformed member header as an error instead of treating it as
    /// the end of the archive.
    pub strict: bool,
}

/// The first short import member naming a DLL.
#[derive(Debug, Clone)]
pub struct FoundImport<'data> {
    member: ArchiveMember<'data>,
    architecture: Architecture,
    symbol: Option<String>,
    dll: String,
}

impl<'data> FoundImport<'data> {
    /// Returns the archive member the import was found in.
    pub fn member(&self) -> &ArchiveMember<'data> {
        &self.member
    }

    /// Returns the architecture of the import.
    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// Returns the imported symbol name.
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Returns the name of the DLL.
    pub fn dll(&self) -> &str {
        &self.dll
    }

    pub fn into_dll(self) -> String {
        self.dll
    }
}

/// Returns the DLL name from the first short import member in the archive.
///
/// Malformed member headers end the search. Only a missing archive magic is
/// an error.
pub fn find_dll_name(data: &[u8]) -> Result<Option<String>, FormatError> {
    let mut members = ArchiveMemberIterator::parse(data)?;
    Ok(find_import(&mut members).map(FoundImport::into_dll))
}

/// Searches the archive for the first short import member naming a DLL.
pub fn scan(data: &[u8], options: ScanOptions) -> Result<Option<FoundImport<'_>>, ScanError> {
    let mut members = ArchiveMemberIterator::parse(data)?;
    if let Some(found) = find_import(&mut members) {
        return Ok(Some(found));
    }

    match members.end() {
        Some(ArchiveEnd::Malformed(e)) if options.strict => Err(e.clone().into()),
        _ => Ok(None),
    }
}

fn find_import<'data>(members: &mut ArchiveMemberIterator<'data>) -> Option<FoundImport<'data>> {
    for member in members {
        let Some(descriptor) = ShortImportDescriptor::classify(member.data()) else {
            continue;
        };

        let (symbol, dll) = descriptor.names();
        match dll {
            Some(dll) if !dll.is_empty() => {
                trace!(
                    "'{}' imports {} (hint {}) from {dll}",
                    member.name().escape_ascii(),
                    symbol.as_deref().unwrap_or("<unterminated>"),
                    descriptor.header().ordinal_or_hint.get(LittleEndian)
                );

                return Some(FoundImport {
                    member,
                    architecture: descriptor.architecture(),
                    symbol,
                    dll,
                });
            }
            _ => {
                debug!(
                    "short import member at {:#x} has no DLL name",
                    member.offset()
                );
            }
        }
    }

    None
}
