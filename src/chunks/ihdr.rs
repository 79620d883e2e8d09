use nom::{
    combinator::all_consuming,
    number::complete::{be_u32, u8},
    sequence::tuple,
    IResult,
};

use super::{append_chunk, ParseableChunk, FRAMING_OVERHEAD};

pub(crate) const PAYLOAD_LENGTH: usize = 13;

pub const TRUECOLOR: u8 = 2;
const CHANNELS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IHDRChunk {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
}

impl IHDRChunk {
    /// Header for 8 bits per channel RGB without interlacing, the only layout
    /// this crate writes.
    pub fn truecolor(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: TRUECOLOR,
            compression_method: 0,
            filter_method: 0,
            interlace_method: 0,
        }
    }

    /// Whether every field other than the dimensions matches
    /// [`IHDRChunk::truecolor`].
    pub fn is_plain_truecolor(&self) -> bool {
        *self == Self::truecolor(self.width, self.height)
    }

    pub fn payload(&self) -> [u8; PAYLOAD_LENGTH] {
        let mut data = [0; PAYLOAD_LENGTH];
        data[0..4].copy_from_slice(&self.width.to_be_bytes());
        data[4..8].copy_from_slice(&self.height.to_be_bytes());
        data[8..].copy_from_slice(&[
            self.bit_depth,
            self.color_type,
            self.compression_method,
            self.filter_method,
            self.interlace_method,
        ]);
        data
    }

    /// Bytes per unfiltered 8 bit RGB scanline, including the leading filter
    /// byte.
    pub(crate) fn scanline_size(&self) -> usize {
        self.width as usize * CHANNELS + 1
    }
}

impl<'a> ParseableChunk<'a> for IHDRChunk {
    type Output = Vec<u8>;

    const HEADER: &'static [u8; 4] = b"IHDR";

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (
            rest,
            (
                width,
                height,
                bit_depth,
                color_type,
                compression_method,
                filter_method,
                interlace_method,
            ),
        ) = all_consuming(tuple((be_u32, be_u32, u8, u8, u8, u8, u8)))(chunk_data)?;
        Ok((
            rest,
            IHDRChunk {
                width,
                height,
                bit_depth,
                color_type,
                compression_method,
                filter_method,
                interlace_method,
            },
        ))
    }

    fn to_bytes(&self) -> Self::Output {
        let mut bytes = Vec::with_capacity(PAYLOAD_LENGTH + FRAMING_OVERHEAD);
        append_chunk(&mut bytes, Self::HEADER, &self.payload());
        bytes
    }
}
