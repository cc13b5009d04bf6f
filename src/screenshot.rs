//! Screenshot - PNG-encoded frame embedded in a save record

use crate::Result;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// PNG bytes of one captured frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    png: Vec<u8>,
}

impl Screenshot {
    /// Encode a captured frame as PNG
    pub fn encode(frame: &RgbaImage) -> Result<Self> {
        let mut png = Vec::new();
        frame.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(Self { png })
    }

    /// Wrap bytes read back from a save record
    ///
    /// The bytes are kept as-is; they are only decoded when displayed.
    pub fn from_png_bytes(png: Vec<u8>) -> Self {
        Self { png }
    }

    /// Read a PNG file from disk, rejecting anything that does not decode
    pub fn read_from(path: &Path) -> Result<Self> {
        let png = std::fs::read(path)?;
        let screenshot = Self::from_png_bytes(png);
        screenshot.decode()?;
        Ok(screenshot)
    }

    /// Write the PNG bytes to disk unchanged
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.png)?;
        Ok(())
    }

    /// Decode back to pixels for display
    pub fn decode(&self) -> Result<RgbaImage> {
        let image = image::load_from_memory_with_format(&self.png, ImageFormat::Png)?;
        Ok(image.to_rgba8())
    }

    /// Width and height of the encoded frame
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        Ok(self.decode()?.dimensions())
    }

    /// Check for the PNG file signature
    pub fn looks_like_png(&self) -> bool {
        self.png.starts_with(&PNG_SIGNATURE)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }

    pub fn len(&self) -> usize {
        self.png.len()
    }

    pub fn is_empty(&self) -> bool {
        self.png.is_empty()
    }
}
