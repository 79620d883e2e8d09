use nom::IResult;

use super::{append_chunk, check_length, ParseableChunk, FRAMING_OVERHEAD};
use crate::EncodingError;

/// Compressed image data, borrowed from the encoder's buffer or the file
/// being read.
#[derive(Debug)]
pub struct IDATChunk<'a> {
    pub data: &'a [u8],
}

impl<'a> IDATChunk<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, EncodingError> {
        check_length(data)?;
        Ok(Self { data })
    }
}

impl<'a> ParseableChunk<'a> for IDATChunk<'a> {
    type Output = Vec<u8>;

    const HEADER: &'static [u8; 4] = b"IDAT";

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        Ok((&chunk_data[0..0], IDATChunk { data: chunk_data }))
    }

    fn to_bytes(&self) -> Self::Output {
        let mut bytes = Vec::with_capacity(self.data.len() + FRAMING_OVERHEAD);
        append_chunk(&mut bytes, Self::HEADER, self.data);
        bytes
    }
}
