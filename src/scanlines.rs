use crate::{chunks::ihdr::IHDRChunk, EncodingError, Pixel};

/// Largest width or height a PNG header may declare.
pub const MAX_DIMENSION: u32 = (1 << 31) - 1;

/// Checks both dimensions and returns the number of pixels they describe.
pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, EncodingError> {
    for (name, value) in [("width", width), ("height", height)] {
        if value == 0 || value > MAX_DIMENSION {
            return Err(EncodingError::invalid(format!(
                "{name} must be between 1 and {MAX_DIMENSION}, got {value}"
            )));
        }
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| EncodingError::invalid(format!("{width}x{height} image is too large")))
}

/// Lays pixels out as PNG scanlines: a zero filter byte at the start of each
/// row followed by that row's red, green and blue bytes.
///
/// The source must yield exactly `width * height` pixels in row-major order.
/// It is never pulled more than one pixel past that count.
pub fn serialize<I>(width: u32, height: u32, pixels: I) -> Result<Vec<u8>, EncodingError>
where
    I: IntoIterator,
    I::Item: Into<Pixel>,
{
    let expected = pixel_count(width, height)?;
    let scanline_size = IHDRChunk::truecolor(width, height).scanline_size();
    let total = scanline_size
        .checked_mul(height as usize)
        .ok_or_else(|| EncodingError::invalid(format!("{width}x{height} image is too large")))?;

    let mut pixels = pixels.into_iter();
    // Lazy sources report no lower bound, so only reserve what is promised.
    let promised = pixels
        .size_hint()
        .0
        .min(expected)
        .saturating_mul(3)
        .saturating_add(height as usize);
    let mut data = Vec::with_capacity(total.min(promised));

    for row in 0..height as usize {
        data.push(0);
        for column in 0..width as usize {
            let pixel: Pixel = pixels
                .next()
                .ok_or_else(|| {
                    EncodingError::invalid(format!(
                        "pixel source yielded {} pixels, expected {expected}",
                        row * width as usize + column
                    ))
                })?
                .into();
            data.extend(pixel.to_bytes());
        }
        if row == 0 {
            // A full first row shows the source is real; size for the rest.
            data.reserve_exact(total - data.len());
        }
    }
    if pixels.next().is_some() {
        return Err(EncodingError::invalid(format!(
            "pixel source yielded more than {expected} pixels"
        )));
    }
    debug_assert_eq!(data.len(), total);
    Ok(data)
}
