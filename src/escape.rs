use std::io::{self, Write};

/// Writes `text` so it can sit between the double quotes of a C string
/// literal. Only newline, tab, `"` and `\` are rewritten; every other byte
/// is copied as is.
pub fn write_escaped<W: Write>(out: &mut W, text: &[u8]) -> io::Result<()> {
    for &byte in text {
        match byte {
            b'\n' => out.write_all(b"\\n")?,
            b'\t' => out.write_all(b"\\t")?,
            b'"' => out.write_all(b"\\\"")?,
            b'\\' => out.write_all(b"\\\\")?,
            _ => out.write_all(&[byte])?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape(text: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        write_escaped(&mut out, text).unwrap();
        out
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape(b"hello, world 1.0"), b"hello, world 1.0");
        assert_eq!(escape(b""), b"");
    }

    #[test]
    fn special_characters_are_escaped() {
        assert_eq!(escape(b"a\nb"), b"a\\nb");
        assert_eq!(escape(b"a\tb"), b"a\\tb");
        assert_eq!(escape(br#"a"b"#), br#"a\"b"#);
        assert_eq!(escape(br"a\b"), br"a\\b");
    }

    #[test]
    fn quote_after_backslash() {
        // a\"b -> a\\\"b, which C reads back as a\"b
        assert_eq!(escape(br#"a\"b"#), br#"a\\\"b"#);
    }

    #[test]
    fn other_bytes_pass_through() {
        assert_eq!(escape(&[0x00, 0xff, b'\r']), vec![0x00, 0xff, b'\r']);
    }
}
