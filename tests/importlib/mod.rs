use dllname::importlib::{
    ArchiveMemberIterator, FormatError, MalformedMemberKind, ScanError, ScanOptions,
    ShortImportDescriptor, find_dll_name, scan,
};
use object::{
    Architecture,
    pe::{IMAGE_FILE_MACHINE_AMD64, IMAGE_FILE_MACHINE_I386},
};

use crate::utils::build::{ArchiveBuilder, coff_object, member_header, short_import};

const STRICT: ScanOptions = ScanOptions { strict: true };

#[test]
fn not_an_archive() {
    let inputs: [&[u8]; 5] = [
        b"",
        b"!<arch>",
        b"!<thin>\n",
        b"MZ\x90\x00\x03\x00\x00\x00",
        b"\x7fELF\x02\x01\x01\x00",
    ];

    for data in inputs {
        assert_eq!(find_dll_name(data), Err(FormatError));
        assert!(matches!(scan(data, STRICT), Err(ScanError::Format(_))));
    }
}

#[test]
fn empty_archive() {
    let data = ArchiveBuilder::default().build();
    assert_eq!(data, object::archive::MAGIC);
    assert_eq!(find_dll_name(&data), Ok(None));
    assert!(matches!(scan(&data, STRICT), Ok(None)));
}

#[test]
fn no_short_imports() {
    let data = ArchiveBuilder::new()
        .add_linker_member(&["foo", "bar"])
        .add_member("foo.obj/", &coff_object(IMAGE_FILE_MACHINE_AMD64))
        .add_member("bar.obj/", &coff_object(IMAGE_FILE_MACHINE_I386))
        .build();

    assert_eq!(find_dll_name(&data), Ok(None));
}

#[test]
fn single_short_import() {
    let data = ArchiveBuilder::new()
        .add_linker_member(&["__imp_Foo", "Foo"])
        .add_member("FOO.dll/", &short_import(IMAGE_FILE_MACHINE_AMD64, "Foo", "FOO.dll"))
        .build();

    assert_eq!(find_dll_name(&data), Ok(Some("FOO.dll".to_string())));

    let found = scan(&data, STRICT)
        .unwrap()
        .expect("short import member should be found");
    assert_eq!(found.dll(), "FOO.dll");
    assert_eq!(found.symbol(), Some("Foo"));
    assert_eq!(found.architecture(), Architecture::X86_64);
    assert_eq!(found.member().name(), b"FOO.dll/");
}

#[test]
fn short_import_after_objects() {
    let data = ArchiveBuilder::new()
        .add_linker_member(&["CreateFileA"])
        .add_member("head.obj/", &coff_object(IMAGE_FILE_MACHINE_I386))
        .add_member(
            "KERNEL32.dll/",
            &short_import(IMAGE_FILE_MACHINE_I386, "_CreateFileA@28", "KERNEL32.dll"),
        )
        .build();

    assert_eq!(find_dll_name(&data), Ok(Some("KERNEL32.dll".to_string())));
}

#[test]
fn first_match_wins() {
    let data = ArchiveBuilder::new()
        .add_member("a.dll/", &short_import(IMAGE_FILE_MACHINE_AMD64, "a", "first.dll"))
        .add_member("b.dll/", &short_import(IMAGE_FILE_MACHINE_AMD64, "b", "second.dll"))
        .build();

    assert_eq!(find_dll_name(&data), Ok(Some("first.dll".to_string())));
}

#[test]
fn odd_length_member_padding() {
    let odd = b"odd";

    let padded = ArchiveBuilder::new()
        .add_member("odd.obj/", odd)
        .add_member("FOO.dll/", &short_import(IMAGE_FILE_MACHINE_AMD64, "Foo", "FOO.dll"))
        .build();
    assert_eq!(padded.len() % 2, 0);
    assert_eq!(find_dll_name(&padded), Ok(Some("FOO.dll".to_string())));

    let members = ArchiveMemberIterator::parse(&padded)
        .unwrap()
        .map(|member| member.offset())
        .collect::<Vec<_>>();
    assert_eq!(members, [8, 8 + 60 + 4]);

    // The next header is read at the padded offset, so an archive missing
    // the pad byte does not yield the short import.
    let unpadded = ArchiveBuilder::new()
        .add_unpadded_member("odd.obj/", odd)
        .add_member("FOO.dll/", &short_import(IMAGE_FILE_MACHINE_AMD64, "Foo", "FOO.dll"))
        .build();
    assert_eq!(find_dll_name(&unpadded), Ok(None));
    assert!(matches!(
        scan(&unpadded, STRICT),
        Err(ScanError::Malformed(e)) if e.offset == 8 + 60 + 4
    ));
}

#[test]
fn unterminated_dll_name() {
    let mut member = short_import(IMAGE_FILE_MACHINE_AMD64, "Foo", "FOO.dll");
    member.pop();

    let data = ArchiveBuilder::new().add_member("FOO.dll/", &member).build();
    assert_eq!(find_dll_name(&data), Ok(None));

    // A later member still counts
    let data = ArchiveBuilder::new()
        .add_member("FOO.dll/", &member)
        .add_member("BAR.dll/", &short_import(IMAGE_FILE_MACHINE_AMD64, "Bar", "BAR.dll"))
        .build();
    assert_eq!(find_dll_name(&data), Ok(Some("BAR.dll".to_string())));
}

#[test]
fn short_data_with_signature() {
    let member = [0x00, 0x00, 0xff, 0xff, b'A', 0, b'B', 0];
    assert!(ShortImportDescriptor::classify(&member).is_none());

    let data = ArchiveBuilder::new().add_member("short/", &member).build();
    assert_eq!(find_dll_name(&data), Ok(None));
}

#[test]
fn minimal_archive() {
    let mut member: Vec<u8> = vec![0x00, 0x00, 0xff, 0xff];
    member.extend(b"0123456789abcdef");
    member.extend(b"A\0B\0");

    let mut data = object::archive::MAGIC.to_vec();
    data.extend(member_header("", "24"));
    data.extend(&member);

    assert_eq!(data.len(), 8 + 60 + 24);
    assert_eq!(find_dll_name(&data), Ok(Some("B".to_string())));
}

#[test]
fn malformed_trailing_header() {
    let short = short_import(IMAGE_FILE_MACHINE_AMD64, "Foo", "FOO.dll");

    let followed_by_short = |header: Vec<u8>| [header, short.clone()].concat();

    let cases = [
        (b"garbage".to_vec(), MalformedMemberKind::TruncatedHeader(7)),
        (
            member_header("x/", "4")[..58].to_vec(),
            MalformedMemberKind::TruncatedHeader(58),
        ),
        (
            followed_by_short(member_header("x/", "ten")),
            MalformedMemberKind::InvalidSize,
        ),
        (
            followed_by_short(member_header("x/", "4000")),
            MalformedMemberKind::DataOutOfBounds(4000),
        ),
    ];

    for (trailing, kind) in cases {
        let data = ArchiveBuilder::new()
            .add_member("obj/", &coff_object(IMAGE_FILE_MACHINE_AMD64))
            .add_raw(&trailing)
            .build();

        // Nothing after the malformed header is considered
        assert_eq!(find_dll_name(&data), Ok(None));
        assert!(matches!(scan(&data, ScanOptions::default()), Ok(None)));

        match scan(&data, STRICT) {
            Err(ScanError::Malformed(e)) => {
                assert_eq!(e.offset, 8 + 60 + 20);
                assert_eq!(e.kind, kind);
            }
            res => panic!("unexpected scan result {res:?}"),
        }
    }
}

#[test]
fn invalid_terminator() {
    let mut header = member_header("FOO.dll/", "31");
    header[58..].copy_from_slice(b"\n\n");

    let data = ArchiveBuilder::new()
        .add_raw(&header)
        .add_raw(&short_import(IMAGE_FILE_MACHINE_AMD64, "Foo", "FOO.dll"))
        .build();

    assert_eq!(find_dll_name(&data), Ok(None));
    assert!(matches!(
        scan(&data, STRICT),
        Err(ScanError::Malformed(e)) if e.kind == MalformedMemberKind::InvalidTerminator
    ));
}
