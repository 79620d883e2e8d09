//! A small PNG encoder for 8 bit RGB images.
//!
//! ```
//! let png = rgb_png::encode(1, 1, [(255u8, 0u8, 0u8)]).unwrap();
//! assert_eq!(png[..8], rgb_png::SIGNATURE);
//! ```

use nom::{bytes::complete::tag, IResult};

pub mod chunks;
mod decoder;
mod encoder;
mod error;
mod image;
mod image_data;
mod pixel;
mod scanlines;

pub use encoder::{encode, encode_to, Encoder, SIGNATURE};
pub use error::EncodingError;
pub use image::Image;
pub use image_data::{Compressor, ZlibCompressor};
pub use pixel::Pixel;
pub use scanlines::{serialize, MAX_DIMENSION};

pub fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(&SIGNATURE[..])(input)
}
