use std::io::Write;

use crate::{
    chunks::{
        idat::IDATChunk, iend::IENDChunk, ihdr::IHDRChunk, ParseableChunk, FRAMING_OVERHEAD,
    },
    image_data::{Compressor, ZlibCompressor},
    scanlines, EncodingError, Pixel,
};

pub const SIGNATURE: [u8; 8] = *b"\x89PNG\x0d\x0a\x1a\x0a";

/// Writes 8 bit RGB images as a signature, `IHDR`, a single unfiltered
/// `IDAT` and `IEND`.
#[derive(Debug, Clone, Default)]
pub struct Encoder<C = ZlibCompressor> {
    compressor: C,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Compressor> Encoder<C> {
    pub fn with_compressor(compressor: C) -> Self {
        Self { compressor }
    }

    /// Encodes a complete PNG file.
    ///
    /// `pixels` must yield exactly `width * height` pixels, row by row from
    /// the top-left corner. Every check happens before any output exists.
    pub fn encode<I>(&self, width: u32, height: u32, pixels: I) -> Result<Vec<u8>, EncodingError>
    where
        I: IntoIterator,
        I::Item: Into<Pixel>,
    {
        let header = IHDRChunk::truecolor(width, height);
        let scanlines = scanlines::serialize(width, height, pixels)?;
        let compressed = self
            .compressor
            .compress(&scanlines)
            .map_err(EncodingError::EncodingFailed)?;
        log::debug!(
            "encoding {width}x{height} image: {} scanline bytes compressed to {}",
            scanlines.len(),
            compressed.len()
        );
        drop(scanlines);
        let idat = IDATChunk::new(&compressed)?;

        let mut png = Vec::with_capacity(
            SIGNATURE.len() + 3 * FRAMING_OVERHEAD + header.payload().len() + compressed.len(),
        );
        png.extend(SIGNATURE);
        png.extend(header.to_bytes());
        png.extend(idat.to_bytes());
        png.extend(IENDChunk.to_bytes());
        Ok(png)
    }

    /// Encodes the image and writes it to `writer` in one go. Nothing is
    /// written if encoding fails.
    pub fn encode_to<W, I>(
        &self,
        mut writer: W,
        width: u32,
        height: u32,
        pixels: I,
    ) -> Result<(), EncodingError>
    where
        W: Write,
        I: IntoIterator,
        I::Item: Into<Pixel>,
    {
        let png = self.encode(width, height, pixels)?;
        writer.write_all(&png)?;
        writer.flush()?;
        Ok(())
    }
}

/// Encodes with the default compressor. See [`Encoder::encode`].
pub fn encode<I>(width: u32, height: u32, pixels: I) -> Result<Vec<u8>, EncodingError>
where
    I: IntoIterator,
    I::Item: Into<Pixel>,
{
    Encoder::new().encode(width, height, pixels)
}

/// Encodes with the default compressor into `writer`. See [`Encoder::encode_to`].
pub fn encode_to<W, I>(writer: W, width: u32, height: u32, pixels: I) -> Result<(), EncodingError>
where
    W: Write,
    I: IntoIterator,
    I::Item: Into<Pixel>,
{
    Encoder::new().encode_to(writer, width, height, pixels)
}
