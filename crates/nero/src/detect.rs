//! Content type detection from magic bytes.
//!
//! [`detect`] is a pure function over the raw payload. It only knows the handful of
//! signatures the store cares about; everything it cannot place is reported as
//! `application/octet-stream` with no extension.

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];
const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const GIF87_MAGIC: &[u8; 6] = b"GIF87a";
const GIF89_MAGIC: &[u8; 6] = b"GIF89a";
const RIFF_MAGIC: &[u8; 4] = b"RIFF";
const WEBP_MAGIC: &[u8; 4] = b"WEBP";
const BMP_MAGIC: &[u8; 2] = b"BM";
const FTYP_MAGIC: &[u8; 4] = b"ftyp";

/// A detected MIME type and its canonical file extension (leading dot included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mime {
    pub name: &'static str,
    pub extension: &'static str,
}

impl Mime {
    pub const JPEG: Mime = Mime::new("image/jpeg", ".jpg");
    pub const PNG: Mime = Mime::new("image/png", ".png");
    pub const APNG: Mime = Mime::new("image/vnd.mozilla.apng", ".png");
    pub const GIF: Mime = Mime::new("image/gif", ".gif");
    pub const WEBP: Mime = Mime::new("image/webp", ".webp");
    pub const BMP: Mime = Mime::new("image/bmp", ".bmp");
    pub const MP4: Mime = Mime::new("video/mp4", ".mp4");
    pub const TEXT: Mime = Mime::new("text/plain; charset=utf-8", ".txt");
    pub const OCTET_STREAM: Mime = Mime::new("application/octet-stream", "");

    const fn new(name: &'static str, extension: &'static str) -> Self {
        Self { name, extension }
    }
}

#[must_use]
pub fn detect(bytes: &[u8]) -> Mime {
    if bytes.starts_with(&JPEG_MAGIC) {
        return Mime::JPEG;
    }
    if bytes.starts_with(&PNG_MAGIC) {
        return if is_animated_png(&bytes[PNG_MAGIC.len()..]) {
            Mime::APNG
        } else {
            Mime::PNG
        };
    }
    if bytes.starts_with(GIF87_MAGIC) || bytes.starts_with(GIF89_MAGIC) {
        return Mime::GIF;
    }
    if bytes.len() >= 12 && bytes.starts_with(RIFF_MAGIC) && &bytes[8..12] == WEBP_MAGIC {
        return Mime::WEBP;
    }
    if bytes.starts_with(BMP_MAGIC) {
        return Mime::BMP;
    }
    if bytes.len() >= 8 && &bytes[4..8] == FTYP_MAGIC {
        return Mime::MP4;
    }
    if !bytes.contains(&0) && std::str::from_utf8(bytes).is_ok() {
        return Mime::TEXT;
    }
    Mime::OCTET_STREAM
}

/// Walks PNG chunks looking for an animation control chunk ahead of the image data.
fn is_animated_png(mut chunks: &[u8]) -> bool {
    // length (4) + type (4) ... data ... crc (4)
    while chunks.len() >= 8 {
        let len = u32::from_be_bytes([chunks[0], chunks[1], chunks[2], chunks[3]]) as usize;
        match &chunks[4..8] {
            b"acTL" => return true,
            b"IDAT" => return false,
            _ => {}
        }
        let Some(next) = len.checked_add(12) else {
            return false;
        };
        if next > chunks.len() {
            return false;
        }
        chunks = &chunks[next..];
    }
    false
}
