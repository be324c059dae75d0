//! Decoding of backslash-escape notation into raw bytes.
//!
//! This is the heart of escline: every line the user types passes through
//! [`unescape`] before it is written to the terminal, so `\e[31m` becomes a
//! real CSI color sequence and `\u00e9` becomes the two UTF-8 bytes of U+00E9.

/// The escape vocabulary recognized by [`unescape`], paired with short
/// descriptions. Rendered by `escline list-escapes`.
pub static ESCAPES: &[(&str, &str)] = &[
    ("\\a", "bell (0x07)"),
    ("\\b", "backspace (0x08)"),
    ("\\t", "horizontal tab (0x09)"),
    ("\\n", "line feed (0x0A)"),
    ("\\v", "vertical tab (0x0B)"),
    ("\\f", "form feed (0x0C)"),
    ("\\r", "carriage return (0x0D)"),
    ("\\e", "escape (0x1B)"),
    ("\\\\", "literal backslash"),
    ("\\xHH", "byte from up to 2 hex digits, UTF-8 encoded"),
    ("\\uHHHH", "code point from up to 4 hex digits, UTF-8 encoded"),
];

/// Decodes backslash-escape notation in `input` into the raw bytes it denotes.
///
/// Recognizes the named escapes `\a \b \t \n \v \f \r \e \\` along with
/// `\xHH` (up to 2 hex digits) and `\uHHHH` (up to 4 hex digits). Hex digits
/// are parsed case-insensitively and the resulting code point is UTF-8
/// encoded into the output. Everything else is copied byte-for-byte.
///
/// This is a total function; malformed escapes never fail:
/// - `\x`/`\u` with no hex digit after it is dropped entirely, and scanning
///   resumes at the byte that was not a hex digit.
/// - A backslash followed by an unrecognized byte passes through as the two
///   literal bytes.
/// - A lone `\` at the end of the input is copied verbatim.
///
/// Code points are encoded with the plain UTF-8 bit arithmetic and no range
/// checks, so surrogates (and values above U+10FFFF, were they reachable)
/// produce byte sequences that are not strictly legal UTF-8.
///
/// ## Example
/// ```
/// use escline_core::unescape::unescape;
/// assert_eq!(unescape(br"\x41\n"), b"A\n");
/// assert_eq!(unescape(br"\u00e9"), [0xC3, 0xA9]);
/// ```
#[must_use]
pub fn unescape(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        let byte = input[i];
        if byte != b'\\' || i + 1 == input.len() {
            out.push(byte);
            i += 1;
            continue;
        }

        let kind = input[i + 1];
        match kind {
            b'x' | b'u' => {
                let max_digits = if kind == b'x' { 2 } else { 4 };
                let digits = &input[i + 2..];
                let count = digits
                    .iter()
                    .take(max_digits)
                    .take_while(|b| b.is_ascii_hexdigit())
                    .count();

                if count > 0 {
                    let value = digits[..count]
                        .iter()
                        .fold(0u32, |acc, &d| (acc << 4) | hex_value(d));
                    push_code_point(&mut out, value);
                }
                // A bare `\x`/`\u` emits nothing; the next scan position is
                // the byte that failed to be a hex digit.
                i += 2 + count;
            }
            _ => {
                match kind {
                    b'a' => out.push(0x07),
                    b'b' => out.push(0x08),
                    b't' => out.push(b'\t'),
                    b'n' => out.push(b'\n'),
                    b'v' => out.push(0x0B),
                    b'f' => out.push(0x0C),
                    b'r' => out.push(b'\r'),
                    b'e' => out.push(0x1B),
                    b'\\' => out.push(b'\\'),
                    unknown => out.extend_from_slice(&[b'\\', unknown]),
                }
                i += 2;
            }
        }
    }
    out
}

/// Caller guarantees `digit` is an ascii hex digit.
const fn hex_value(digit: u8) -> u32 {
    match digit {
        b'0'..=b'9' => (digit - b'0') as u32,
        b'a'..=b'f' => (digit - b'a' + 10) as u32,
        _ => (digit - b'A' + 10) as u32,
    }
}

/// Appends the UTF-8 encoding of `value` to `out`.
///
/// Pure bit arithmetic with no validity check; any `u32` gets the byte
/// pattern its magnitude selects.
fn push_code_point(out: &mut Vec<u8>, value: u32) {
    if value <= 0x7F {
        out.push(value as u8);
    } else if value <= 0x7FF {
        out.push(0xC0 | (value >> 6) as u8);
        out.push(0x80 | (value & 0x3F) as u8);
    } else if value <= 0xFFFF {
        out.push(0xE0 | (value >> 12) as u8);
        out.push(0x80 | ((value >> 6) & 0x3F) as u8);
        out.push(0x80 | (value & 0x3F) as u8);
    } else {
        out.push(0xF0 | (value >> 18) as u8);
        out.push(0x80 | ((value >> 12) & 0x3F) as u8);
        out.push(0x80 | ((value >> 6) & 0x3F) as u8);
        out.push(0x80 | (value & 0x3F) as u8);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn plain_text_is_copied_verbatim() {
        assert_eq!(unescape(b"hello, world"), b"hello, world");
    }

    #[test]
    fn empty_input_decodes_to_nothing() {
        assert_eq!(unescape(b""), b"");
    }

    #[test]
    fn identity_holds_without_backslashes() {
        // Raw control bytes are not escapes; they map 1:1.
        let input = b"plain text, 123 and \x1B[31m raw bytes";
        assert_eq!(unescape(input), input);
    }

    #[test]
    fn named_escapes() {
        assert_eq!(
            unescape(br"\a\b\t\n\v\f\r\e"),
            [0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x1B]
        );
        assert_eq!(unescape(br"\\"), b"\\");
    }

    #[test]
    fn hex_escape_two_digits() {
        assert_eq!(unescape(br"\x41"), b"A");
    }

    #[test]
    fn hex_escape_single_digit() {
        assert_eq!(unescape(br"\x1"), [0x01]);
    }

    #[test]
    fn hex_escape_stops_after_two_digits() {
        assert_eq!(unescape(br"\x415"), b"A5");
    }

    #[test]
    fn hex_digits_are_case_insensitive() {
        assert_eq!(unescape(br"\x1B"), [0x1B]);
        assert_eq!(unescape(br"\x1b"), [0x1B]);
    }

    #[test]
    fn unicode_escape_two_byte_sequence() {
        assert_eq!(unescape(br"\u00e9"), [0xC3, 0xA9]);
    }

    #[test]
    fn unicode_escape_three_byte_sequence() {
        assert_eq!(unescape(br"\u2764"), "\u{2764}".as_bytes());
    }

    #[test]
    fn unicode_escape_consumes_at_most_four_digits() {
        // `\u1f600` is U+1F60 followed by a literal '0'.
        let mut expected = "\u{1F60}".as_bytes().to_vec();
        expected.push(b'0');
        assert_eq!(unescape(br"\u1f600"), expected);
    }

    #[test]
    fn bare_hex_marker_is_dropped() {
        assert_eq!(unescape(br"\x"), b"");
        assert_eq!(unescape(br"\u"), b"");
        assert_eq!(unescape(br"\xzz"), b"zz");
    }

    #[test]
    fn unknown_escape_passes_through() {
        assert_eq!(unescape(br"\q"), br"\q");
    }

    #[test]
    fn trailing_backslash_is_literal() {
        assert_eq!(unescape(br"abc\"), b"abc\\");
    }

    #[test]
    fn surrogate_values_encode_arithmetically() {
        // No validity check on the decoded value.
        assert_eq!(unescape(br"\ud800"), [0xED, 0xA0, 0x80]);
    }

    #[test]
    fn code_points_above_ffff_encode_to_four_bytes() {
        let mut out = Vec::new();
        push_code_point(&mut out, 0x1F600);
        assert_eq!(out, "\u{1F600}".as_bytes());
    }
}
