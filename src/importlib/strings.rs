/// Reads the null-terminated ASCII string starting at `start`.
///
/// Returns the string and the offset just past its terminator. Bytes outside
/// the ASCII range are dropped. If there is no terminator before the end of
/// `data`, returns `None` and the length of `data`.
pub fn read_ascii_string(data: &[u8], start: usize) -> (Option<String>, usize) {
    let Some(tail) = data.get(start..) else {
        return (None, data.len());
    };

    match memchr::memchr(0, tail) {
        Some(len) => {
            let value = tail[..len]
                .iter()
                .filter(|b| b.is_ascii())
                .map(|&b| char::from(b))
                .collect();
            (Some(value), start + len + 1)
        }
        None => (None, data.len()),
    }
}
