/// Number of leading bytes inspected when classifying a file
const DETECTION_WINDOW: usize = 4096;

const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];
const BOM_UTF16_LE: [u8; 2] = [0xFF, 0xFE];
const BOM_UTF16_BE: [u8; 2] = [0xFE, 0xFF];

/// Text encoding detected from a file's leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Ascii,
    /// Not text; content is omitted from reports
    Binary,
}

impl Encoding {
    /// Label used in verbose output
    pub fn label(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf16Be => "UTF-16BE",
            Encoding::Ascii => "ASCII",
            Encoding::Binary => "binary",
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, Encoding::Binary)
    }
}

/// Classify a file's content by inspecting its leading bytes.
///
/// BOM first, then byte patterns. Best effort: UTF-16 without a BOM contains
/// NUL bytes and is classified as binary.
pub fn detect(bytes: &[u8]) -> Encoding {
    let window = &bytes[..bytes.len().min(DETECTION_WINDOW)];

    if window.is_empty() {
        return Encoding::Ascii;
    }

    if window.starts_with(&BOM_UTF8) {
        return Encoding::Utf8;
    }
    if window.starts_with(&BOM_UTF16_LE) {
        return Encoding::Utf16Le;
    }
    if window.starts_with(&BOM_UTF16_BE) {
        return Encoding::Utf16Be;
    }

    if window.contains(&0x00) {
        return Encoding::Binary;
    }

    if window.iter().all(|&b| is_ascii_text_byte(b)) {
        return Encoding::Ascii;
    }

    match std::str::from_utf8(window) {
        Ok(_) => Encoding::Utf8,
        // A multi-byte sequence cut off by the window boundary is still UTF-8
        Err(e) if e.error_len().is_none() => Encoding::Utf8,
        Err(_) => Encoding::Binary,
    }
}

/// Printable ASCII plus the usual text whitespace
fn is_ascii_text_byte(b: u8) -> bool {
    matches!(b, 0x20..=0x7E | b'\t' | b'\n' | b'\r' | 0x0C)
}

/// Decode raw bytes according to the detected encoding.
///
/// Returns `None` for binary content, which is omitted from reports.
/// Invalid sequences inside otherwise-text files are replaced rather than
/// failing the whole file.
pub fn decode(bytes: &[u8], encoding: Encoding) -> Option<String> {
    match encoding {
        Encoding::Ascii => Some(String::from_utf8_lossy(bytes).into_owned()),
        Encoding::Utf8 => {
            let body = bytes.strip_prefix(&BOM_UTF8).unwrap_or(bytes);
            Some(String::from_utf8_lossy(body).into_owned())
        }
        Encoding::Utf16Le => Some(decode_utf16(bytes, true)),
        Encoding::Utf16Be => Some(decode_utf16(bytes, false)),
        Encoding::Binary => None,
    }
}

fn decode_utf16(bytes: &[u8], little_endian: bool) -> String {
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();

    if units.first() == Some(&0xFEFF) {
        units.remove(0);
    }

    char::decode_utf16(units.into_iter())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
