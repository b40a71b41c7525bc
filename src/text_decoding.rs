// @module: Byte-to-text decoding with an ordered encoding fallback list

use std::fmt;

/// Text encodings tried when reading subtitle files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
    Utf16,
}

/// Order in which encodings are attempted; the first success wins.
///
/// Latin-1 maps every byte, so the list never gets past it for input that
/// is not UTF-8. Windows-1252 and UTF-16 only decode through
/// [`TextEncoding::decode`] or the UTF-16 checks in [`decode_text`].
pub static DECODE_ORDER: &[TextEncoding] = &[
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
    TextEncoding::Utf16,
];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

// Windows-1252 code points for 0x80..=0x9F; None marks bytes the code page leaves undefined.
const WINDOWS_1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

impl TextEncoding {
    /// Strictly decode `bytes`, returning None when they are not valid in this encoding
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_string)
            }
            // Every byte is a valid ISO-8859-1 code point.
            Self::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
            Self::Windows1252 => bytes
                .iter()
                .map(|&b| match b {
                    0x80..=0x9F => WINDOWS_1252_HIGH[(b - 0x80) as usize],
                    _ => Some(b as char),
                })
                .collect(),
            Self::Utf16 => decode_utf16(bytes),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
            Self::Windows1252 => "windows-1252",
            Self::Utf16 => "utf-16",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        decode_utf16_units(rest, true)
    } else if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        decode_utf16_units(rest, false)
    } else {
        decode_utf16_units(bytes, false)
    }
}

fn decode_utf16_units(body: &[u8], big_endian: bool) -> Option<String> {
    if body.len() % 2 != 0 {
        return None;
    }

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();

    String::from_utf16(&units).ok()
}

/// UTF-16 without a byte order mark: an even length with NUL bytes, read in
/// the byte order whose high bytes hold most of the NULs. Text that still
/// contains NULs afterwards is not UTF-16.
fn decode_bomless_utf16(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() || bytes.len() % 2 != 0 || !bytes.contains(&0) {
        return None;
    }

    let even_nuls = bytes.iter().step_by(2).filter(|&&b| b == 0).count();
    let odd_nuls = bytes.iter().skip(1).step_by(2).filter(|&&b| b == 0).count();

    decode_utf16_units(bytes, even_nuls > odd_nuls).filter(|text| !text.contains('\0'))
}

/// Decode subtitle bytes using [`DECODE_ORDER`].
///
/// Content that opens with a UTF-16 byte order mark, or that looks like
/// UTF-16 without one, is tried as UTF-16 first, since UTF-8 and Latin-1
/// would otherwise accept it with NULs between the characters.
pub fn decode_text(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    if bytes.starts_with(UTF16_LE_BOM) || bytes.starts_with(UTF16_BE_BOM) {
        if let Some(text) = TextEncoding::Utf16.decode(bytes) {
            return Some((text, TextEncoding::Utf16));
        }
    }
    if let Some(text) = decode_bomless_utf16(bytes) {
        return Some((text, TextEncoding::Utf16));
    }

    DECODE_ORDER
        .iter()
        .find_map(|encoding| encoding.decode(bytes).map(|text| (text, *encoding)))
}
