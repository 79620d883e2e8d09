use anyhow::{ensure, Context};

use crate::{
    decoder::PNGDecoder,
    encoder::encode,
    image_data::decompress_data,
    scanlines::pixel_count,
    EncodingError, Pixel,
};

/// A fully materialised RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, EncodingError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(EncodingError::invalid(format!(
                "{width}x{height} image needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds an image by calling `pixel(x, y)` for every position in row-major
    /// order.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut pixel: impl FnMut(u32, u32) -> Pixel,
    ) -> Result<Self, EncodingError> {
        let mut pixels = Vec::with_capacity(pixel_count(width, height)?);
        for y in 0..height {
            for x in 0..width {
                pixels.push(pixel(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        encode(self.width, self.height, self.pixels.iter().copied())
    }

    /// Reads back 8 bit, non-interlaced RGB files whose rows are all
    /// unfiltered, which covers everything [`Image::encode`] writes.
    pub fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        let (header, compressed) = PNGDecoder::new(bytes)?.parse_ihdr()?.read_image_data()?;
        ensure!(
            header.is_plain_truecolor(),
            "only 8 bit, non-interlaced truecolor images are supported, got bit depth {}, \
             color type {}, compression {}, filter {}, interlace {}",
            header.bit_depth,
            header.color_type,
            header.compression_method,
            header.filter_method,
            header.interlace_method
        );

        let count = pixel_count(header.width, header.height)?;
        let scanline_size = header.scanline_size();
        let expected_len = scanline_size
            .checked_mul(header.height as usize)
            .context("image data size overflows")?;
        let data = decompress_data(&compressed, expected_len)?;
        ensure!(
            data.len() == expected_len,
            "decompressed {} bytes of image data, expected {expected_len}",
            data.len()
        );

        let mut pixels = Vec::with_capacity(count);
        for (row, scanline) in data.chunks_exact(scanline_size).enumerate() {
            let (&filter, samples) = scanline
                .split_first()
                .context("scanline without a filter byte")?;
            ensure!(
                filter == 0,
                "row {row} uses filter type {filter}, only unfiltered rows are supported"
            );
            pixels.extend(
                samples
                    .chunks_exact(3)
                    .map(|rgb| Pixel::new(rgb[0], rgb[1], rgb[2])),
            );
        }
        Ok(Self::new(header.width, header.height, pixels)?)
    }
}
