use std::borrow::Cow;

/// An encoding for interpreting the head of a replay file as text
///
/// The payload markers and field names are plain ascii, but player names may
/// contain non-ascii sequences. If those sequences occur before the payload,
/// decoding them with the wrong encoding shifts where the markers are found,
/// so the encoding is part of the parsing contract rather than an
/// implementation detail.
pub trait Encoding {
    /// Decodes bytes into a utf-8 compatible string -- allocating if necessary
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str>;
}

impl<T: Encoding + ?Sized> Encoding for &'_ T {
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        (**self).decode(data)
    }
}

impl<T: Encoding + ?Sized> Encoding for Box<T> {
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        (**self).decode(data)
    }
}

/// Decodes bytes according to the windows1252 code page
///
/// This is the default encoding, as replay files come from a client that
/// historically wrote its text sections in the platform's ansi code page.
///
/// ```
/// use rofl::{Windows1252Encoding, Encoding};
///
/// let encoding = Windows1252Encoding::new();
/// assert_eq!(encoding.decode(b"gameVersion"), "gameVersion");
/// assert_eq!(encoding.decode(b"\xff"), "\u{ff}");
/// assert_eq!(encoding.decode(b"\x8a"), "\u{160}");
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Windows1252Encoding;

impl Windows1252Encoding {
    /// Creates a new windows 1252 decoder
    pub fn new() -> Self {
        Windows1252Encoding
    }

    /// Static method for decoding windows 1252 data
    pub fn decode(data: &[u8]) -> Cow<str> {
        decode_windows1252(data)
    }
}

impl Encoding for Windows1252Encoding {
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        Windows1252Encoding::decode(data)
    }
}

/// Decodes bytes according to the utf8 standard
///
/// Invalid sequences are replaced with the replacement character, as a failed
/// decode of binary sections surrounding the payload should not abort the
/// parse.
///
/// ```
/// use rofl::{Utf8Encoding, Encoding};
///
/// let encoding = Utf8Encoding::new();
/// assert_eq!(encoding.decode(b"gameVersion"), "gameVersion");
/// assert_eq!(encoding.decode(b"J\xc3\xa5hk\xc3\xa5m\xc3\xa5hkke"), "Jåhkåmåhkke");
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Utf8Encoding;

impl Utf8Encoding {
    /// Creates a new utf8 decoder
    pub fn new() -> Self {
        Utf8Encoding
    }

    /// Static method for decoding utf8 data
    pub fn decode(data: &[u8]) -> Cow<str> {
        String::from_utf8_lossy(data)
    }
}

impl Encoding for Utf8Encoding {
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        Utf8Encoding::decode(data)
    }
}

// Translations for 0x80-0x9f, the only range where windows1252 diverges from
// the equivalent unicode code points.
const WINDOWS_1252_SPECIALS: [char; 32] = [
    '\u{20ac}', '\u{81}', '\u{201a}', '\u{0192}', '\u{201e}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02c6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{8d}', '\u{017d}', '\u{8f}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201c}', '\u{201d}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02dc}', '\u{2122}', '\u{0161}', '\u{203a}', '\u{0153}', '\u{9d}', '\u{017e}', '\u{0178}',
];

#[inline]
fn windows1252_char(b: u8) -> char {
    if (0x80..0xa0).contains(&b) {
        WINDOWS_1252_SPECIALS[usize::from(b - 0x80)]
    } else {
        // 0x00-0x7f is ascii and 0xa0-0xff matches latin-1 code points
        char::from(b)
    }
}

pub(crate) fn decode_windows1252(d: &[u8]) -> Cow<str> {
    if d.is_ascii() {
        // The all ascii check means the bytes are guaranteed valid utf-8
        Cow::Borrowed(unsafe { std::str::from_utf8_unchecked(d) })
    } else {
        Cow::Owned(d.iter().map(|&b| windows1252_char(b)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_decodes_borrowed() {
        let decoded = decode_windows1252(b"{\"gameLength\":100}");
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert_eq!(decoded, "{\"gameLength\":100}");
    }

    #[test]
    fn high_bytes_decode_via_table() {
        assert_eq!(decode_windows1252(b"\x80\x9f\xa0\xff"), "\u{20ac}\u{178}\u{a0}\u{ff}");
    }

    #[test]
    fn utf8_lossy_replacement() {
        assert_eq!(Utf8Encoding::decode(b"a\xffb"), "a\u{fffd}b");
    }
}
