use anyhow::anyhow;
use miniz_oxide::{deflate::compress_to_vec_zlib, inflate::decompress_to_vec_zlib_with_limit};

/// Turns the scanline stream into the zlib-wrapped DEFLATE data an `IDAT`
/// chunk carries.
pub trait Compressor {
    fn compress(&self, data: &[u8]) -> anyhow::Result<Vec<u8>>;
}

impl<C: Compressor + ?Sized> Compressor for &C {
    fn compress(&self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        (**self).compress(data)
    }
}

/// `miniz_oxide` backed compressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZlibCompressor {
    level: u8,
}

impl ZlibCompressor {
    /// Same default zlib itself uses.
    pub const DEFAULT_LEVEL: u8 = 6;
    pub const MAX_LEVEL: u8 = 10;

    /// Levels above [`Self::MAX_LEVEL`] are clamped.
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(Self::MAX_LEVEL),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Default for ZlibCompressor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEVEL)
    }
}

impl Compressor for ZlibCompressor {
    fn compress(&self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(compress_to_vec_zlib(data, self.level))
    }
}

/// Inflates image data, giving up once the output grows past `expected_len`.
pub(crate) fn decompress_data(
    compressed_data: &[u8],
    expected_len: usize,
) -> anyhow::Result<Vec<u8>> {
    // One spare byte so a stream of exactly `expected_len` never trips the limit.
    decompress_to_vec_zlib_with_limit(compressed_data, expected_len.saturating_add(1))
        .map_err(|e| anyhow!("Failed to decompress image data: {:?}", e.status))
}
