//! NUL-terminated string buffers exchanged with the shell.

/// Encodes `s` as UTF-16 with a trailing NUL.
pub fn encode_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Encodes an OS string as UTF-16 with a trailing NUL, keeping unpaired
/// surrogates that a `&str` cannot hold.
#[cfg(windows)]
pub fn encode_wide_os(s: &std::ffi::OsStr) -> Vec<u16> {
    use std::os::windows::ffi::OsStrExt;
    s.encode_wide().chain(std::iter::once(0)).collect()
}

/// Decodes a UTF-16 buffer filled by the OS, stopping at the first NUL.
pub fn decode_wide(buf: &[u16]) -> String {
    // Remove trailing null
    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}

/// Length of the NUL-terminated prefix of a narrow buffer.
pub fn narrow_len(buf: &[u8]) -> usize {
    buf.iter().position(|&c| c == 0).unwrap_or(buf.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_wide_appends_nul() {
        assert_eq!(encode_wide("ab"), vec![b'a' as u16, b'b' as u16, 0]);
        assert_eq!(encode_wide(""), vec![0]);
    }

    #[cfg(windows)]
    #[test]
    fn test_encode_wide_os_keeps_unpaired_surrogates() {
        use std::ffi::OsString;
        use std::os::windows::ffi::OsStringExt;

        let name = OsString::from_wide(&[b'a' as u16, 0xD800, b'.' as u16]);
        assert_eq!(encode_wide_os(&name), vec![b'a' as u16, 0xD800, b'.' as u16, 0]);
    }

    #[test]
    fn test_decode_wide_stops_at_first_nul() {
        let mut buf = [0u16; 16];
        for (slot, c) in buf.iter_mut().zip("C:\\app.exe".encode_utf16()) {
            *slot = c;
        }
        assert_eq!(decode_wide(&buf), "C:\\app.exe");
    }

    #[test]
    fn test_decode_wide_without_terminator_uses_whole_buffer() {
        let buf: Vec<u16> = "abc".encode_utf16().collect();
        assert_eq!(decode_wide(&buf), "abc");
    }

    #[test]
    fn test_narrow_len() {
        assert_eq!(narrow_len(b"abc\0\0"), 3);
        assert_eq!(narrow_len(b"abc"), 3);
        assert_eq!(narrow_len(b"\0"), 0);
    }
}
