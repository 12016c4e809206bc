use object::{
    Architecture, LittleEndian as LE, ReadRef,
    pe::{
        IMAGE_FILE_MACHINE_AMD64, IMAGE_FILE_MACHINE_ARM64, IMAGE_FILE_MACHINE_ARMNT,
        IMAGE_FILE_MACHINE_I386, IMAGE_FILE_MACHINE_UNKNOWN, IMPORT_OBJECT_HDR_SIG2,
        ImportObjectHeader,
    },
};

use super::strings::read_ascii_string;

/// Offset of the name strings in a short import member.
const STRINGS_OFFSET: usize = std::mem::size_of::<ImportObjectHeader>();

/// A short import member from an import library.
///
/// The member data is a 20 byte [`ImportObjectHeader`] followed by the
/// imported symbol name and the DLL name as null-terminated strings.
#[derive(Debug, Clone, Copy)]
pub struct ShortImportDescriptor<'data> {
    header: &'data ImportObjectHeader,
    data: &'data [u8],
}

impl<'data> ShortImportDescriptor<'data> {
    /// Returns the member data as a short import descriptor if it starts with
    /// the short import signature.
    ///
    /// Data too small to hold the header is never a descriptor.
    pub fn classify(data: &'data [u8]) -> Option<ShortImportDescriptor<'data>> {
        let header = data.read_at::<ImportObjectHeader>(0).ok()?;

        (header.sig1.get(LE) == IMAGE_FILE_MACHINE_UNKNOWN
            && header.sig2.get(LE) == IMPORT_OBJECT_HDR_SIG2)
            .then_some(Self { header, data })
    }

    /// Returns the import header.
    pub fn header(&self) -> &'data ImportObjectHeader {
        self.header
    }

    /// Returns the architecture from the header machine field.
    pub fn architecture(&self) -> Architecture {
        match self.header.machine.get(LE) {
            IMAGE_FILE_MACHINE_AMD64 => Architecture::X86_64,
            IMAGE_FILE_MACHINE_I386 => Architecture::I386,
            IMAGE_FILE_MACHINE_ARM64 => Architecture::Aarch64,
            IMAGE_FILE_MACHINE_ARMNT => Architecture::Arm,
            _ => Architecture::Unknown,
        }
    }

    /// Returns the imported symbol name and the DLL name.
    ///
    /// A name is `None` if its null terminator is missing. The DLL name is
    /// also `None` if the symbol name is unterminated.
    pub fn names(&self) -> (Option<String>, Option<String>) {
        let (symbol, dll_offset) = read_ascii_string(self.data, STRINGS_OFFSET);
        let (dll, _) = read_ascii_string(self.data, dll_offset);
        (symbol, dll)
    }
}
