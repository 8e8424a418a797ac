//! PNG Header Reader
//!
//! Reads width/height straight out of the IHDR chunk without decoding pixels.
//! Layout: 8-byte signature, then IHDR (length, "IHDR", width, height).

use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Only the first four signature bytes are compared.
pub const PNG_SIGNATURE_PREFIX: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

const WIDTH_OFFSET: usize = 16;
const HEIGHT_OFFSET: usize = 20;
const HEADER_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error(
        "Failed to read image dimensions: Not a valid PNG file (header: 0x{header}). \
         Ensure the file is a PNG. \
         If it's another format, convert it to PNG: e.g. using ImageMagick - \
         `magick input.jpg output.png` or `convert input.jpg output.png`."
    )]
    NotPng { header: String },

    #[error(
        "Failed to read image dimensions: Truncated PNG file: {len} bytes, \
         need at least {min} to read the IHDR dimensions",
        min = HEADER_LEN
    )]
    Truncated { len: usize },

    #[error("Failed to read image dimensions: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract dimensions from raw PNG bytes.
pub fn read_dimensions(bytes: &[u8]) -> Result<ImageDimensions, FormatError> {
    if !bytes.starts_with(&PNG_SIGNATURE_PREFIX) {
        let end = bytes.len().min(8);
        return Err(FormatError::NotPng {
            header: hex::encode(&bytes[..end]),
        });
    }

    if bytes.len() < HEADER_LEN {
        return Err(FormatError::Truncated { len: bytes.len() });
    }

    Ok(ImageDimensions {
        width: be_u32(bytes, WIDTH_OFFSET),
        height: be_u32(bytes, HEIGHT_OFFSET),
    })
}

/// Read a file from disk and extract its PNG dimensions.
pub fn read_file_dimensions(path: &Path) -> Result<ImageDimensions, FormatError> {
    let bytes = fs::read(path)?;
    read_dimensions(&bytes)
}

fn be_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_be_bytes(word)
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Signature + IHDR header carrying the given dimensions.
    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[0x08, 0x06, 0x00, 0x00, 0x00]);
        bytes
    }

    #[test]
    fn test_reads_ihdr_dimensions() {
        for value in [0u32, 1, 65535, 16909060, u32::MAX] {
            let dims = read_dimensions(&png_header(value, value)).unwrap();
            assert_eq!(dims, ImageDimensions { width: value, height: value });
        }

        let dims = read_dimensions(&png_header(1920, 1080)).unwrap();
        assert_eq!(dims.width, 1920);
        assert_eq!(dims.height, 1080);
    }

    #[test]
    fn test_multibyte_width_is_big_endian() {
        let dims = read_dimensions(&png_header(16909060, 7)).unwrap();
        assert_eq!(dims.width, 0x01020304);
        assert_eq!(dims.height, 7);
    }

    #[test]
    fn test_rejects_non_png() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];
        let err = read_dimensions(&jpeg).unwrap_err();
        match &err {
            FormatError::NotPng { header } => assert_eq!(header, "ffd8ffe000104a46"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("0xffd8ffe000104a46"));
        assert!(err.to_string().contains("magick input.jpg output.png"));
    }

    #[test]
    fn test_short_non_png_header_dump() {
        let err = read_dimensions(b"GIF").unwrap_err();
        assert!(matches!(err, FormatError::NotPng { ref header } if header == "474946"));

        let err = read_dimensions(&[]).unwrap_err();
        assert!(matches!(err, FormatError::NotPng { ref header } if header.is_empty()));
    }

    #[test]
    fn test_only_four_signature_bytes_checked() {
        let mut bytes = png_header(256, 256);
        bytes[4..8].copy_from_slice(&[0, 0, 0, 0]);
        assert_eq!(
            read_dimensions(&bytes).unwrap(),
            ImageDimensions { width: 256, height: 256 }
        );
    }

    #[test]
    fn test_every_failure_names_dimension_read() {
        let errors = [
            read_dimensions(b"not a png").unwrap_err(),
            read_dimensions(&PNG_SIGNATURE_PREFIX).unwrap_err(),
            read_file_dimensions(Path::new("/nonexistent/icon.png")).unwrap_err(),
        ];
        for err in errors {
            assert!(
                err.to_string().starts_with("Failed to read image dimensions: "),
                "{err}"
            );
        }
    }

    #[test]
    fn test_truncated_after_signature() {
        let bytes = png_header(256, 256);
        let err = read_dimensions(&bytes[..20]).unwrap_err();
        assert!(matches!(err, FormatError::Truncated { len: 20 }));

        let err = read_dimensions(&PNG_SIGNATURE_PREFIX).unwrap_err();
        assert!(matches!(err, FormatError::Truncated { len: 4 }));
    }
}
