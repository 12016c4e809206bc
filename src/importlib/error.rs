#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not a valid COFF archive (.lib)")]
pub struct FormatError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Malformed(#[from] MalformedMemberError),
}

/// A member header which stopped the archive walk.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed archive member at offset {offset:#x}: {kind}")]
pub struct MalformedMemberError {
    /// Offset of the member header in the archive.
    pub offset: usize,

    pub kind: MalformedMemberKind,
}

impl MalformedMemberError {
    pub fn new(offset: usize, kind: MalformedMemberKind) -> MalformedMemberError {
        Self { offset, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedMemberKind {
    #[error("member header is truncated ({0} bytes remaining)")]
    TruncatedHeader(usize),

    #[error("member size field is not a decimal integer")]
    InvalidSize,

    #[error("member header terminator is invalid")]
    InvalidTerminator,

    #[error("member data extends past the end of the archive ({0} bytes declared)")]
    DataOutOfBounds(usize),
}
