use log::{debug, trace};
use object::{ReadRef, archive};

use super::error::{FormatError, MalformedMemberError, MalformedMemberKind};

/// Size of an archive member header.
const HEADER_SIZE: usize = std::mem::size_of::<archive::Header>();

/// A member record from a COFF archive.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveMember<'data> {
    header: &'data archive::Header,
    offset: usize,
    data: &'data [u8],
}

impl<'data> ArchiveMember<'data> {
    /// Returns the raw name field with the trailing padding removed.
    pub fn name(&self) -> &'data [u8] {
        self.header.name.trim_ascii_end()
    }

    /// Returns the offset of the member header in the archive.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the member data following the header.
    pub fn data(&self) -> &'data [u8] {
        self.data
    }
}

/// Why an [`ArchiveMemberIterator`] stopped yielding members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEnd {
    /// Every byte of the archive was consumed.
    Complete,

    /// A member header could not be parsed.
    Malformed(MalformedMemberError),
}

/// Iterator over the members of a COFF archive in file order.
///
/// Iteration stops at the first header that cannot be parsed. The reason is
/// available from [`ArchiveMemberIterator::end`] afterwards.
#[derive(Debug, Clone)]
pub struct ArchiveMemberIterator<'data> {
    data: &'data [u8],
    offset: usize,
    end: Option<ArchiveEnd>,
}

impl<'data> ArchiveMemberIterator<'data> {
    /// Checks the archive magic and positions the iterator at the first
    /// member header.
    pub fn parse(data: &'data [u8]) -> Result<ArchiveMemberIterator<'data>, FormatError> {
        if !data.starts_with(&archive::MAGIC) {
            return Err(FormatError);
        }

        Ok(Self {
            data,
            offset: archive::MAGIC.len(),
            end: None,
        })
    }

    /// Returns the reason iteration stopped, or `None` while members remain.
    pub fn end(&self) -> Option<&ArchiveEnd> {
        self.end.as_ref()
    }

    fn read_member(&mut self) -> Result<ArchiveMember<'data>, ArchiveEnd> {
        let offset = self.offset;
        let remaining = self.data.len().saturating_sub(offset);
        if remaining == 0 {
            return Err(ArchiveEnd::Complete);
        }

        let malformed =
            |kind| ArchiveEnd::Malformed(MalformedMemberError::new(offset, kind));

        let header = self
            .data
            .read_at::<archive::Header>(offset as u64)
            .map_err(|_| malformed(MalformedMemberKind::TruncatedHeader(remaining)))?;

        let size = parse_size(&header.size).ok_or(malformed(MalformedMemberKind::InvalidSize))?;

        if header.terminator != archive::TERMINATOR {
            return Err(malformed(MalformedMemberKind::InvalidTerminator));
        }

        let data_start = offset + HEADER_SIZE;
        let data_end = data_start
            .checked_add(size)
            .filter(|end| *end <= self.data.len())
            .ok_or(malformed(MalformedMemberKind::DataOutOfBounds(size)))?;

        // Members start on an even offset
        self.offset = data_end + (data_end % 2);

        Ok(ArchiveMember {
            header,
            offset,
            data: &self.data[data_start..data_end],
        })
    }
}

impl<'data> Iterator for ArchiveMemberIterator<'data> {
    type Item = ArchiveMember<'data>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end.is_some() {
            return None;
        }

        match self.read_member() {
            Ok(member) => {
                trace!(
                    "archive member '{}' at {:#x} ({} bytes)",
                    member.name().escape_ascii(),
                    member.offset(),
                    member.data().len()
                );
                Some(member)
            }
            Err(end) => {
                if let ArchiveEnd::Malformed(e) = &end {
                    debug!("stopping archive walk: {e}");
                }

                self.end = Some(end);
                None
            }
        }
    }
}

impl std::iter::FusedIterator for ArchiveMemberIterator<'_> {}

/// Parses the space padded decimal size field of a member header.
fn parse_size(field: &[u8]) -> Option<usize> {
    let digits = field.trim_ascii();
    if !digits.is_ascii() {
        return None;
    }

    std::str::from_utf8(digits).ok()?.parse().ok()
}
