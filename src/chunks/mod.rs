//! Chunk framing for writing, and a CRC-checking chunk reader for inspecting
//! what was written.

use std::fmt;

use anyhow::anyhow;
use nom::{
    bytes::complete::take,
    combinator::map_res,
    error::{Error, ErrorKind},
    number::complete::be_u32,
    sequence::tuple,
    IResult,
};

use crate::EncodingError;

mod crc;
pub mod idat;
pub mod iend;
pub mod ihdr;

pub(crate) use crc::calculate_crc;
use crc::Crc32;

/// Largest payload a single chunk may carry.
pub const MAX_CHUNK_LENGTH: usize = (1 << 31) - 1;

/// Length, type and CRC fields that surround every payload.
pub(crate) const FRAMING_OVERHEAD: usize = 12;

/// A four letter chunk tag such as `IHDR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType([u8; 4]);

impl ChunkType {
    pub fn new(tag: &[u8]) -> Result<Self, EncodingError> {
        let bytes: [u8; 4] = tag.try_into().map_err(|_| {
            EncodingError::invalid(format!(
                "chunk type must be exactly 4 bytes, got {} ({})",
                tag.len(),
                tag.escape_ascii()
            ))
        })?;
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(EncodingError::invalid(format!(
                "chunk type {} must only contain ASCII letters",
                tag.escape_ascii()
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

/// Frames `payload` as a chunk: big-endian length, the tag, the payload, then
/// a big-endian CRC-32 over tag and payload.
pub fn frame(tag: &[u8], payload: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let chunk_type = ChunkType::new(tag)?;
    check_length(payload)?;
    let mut bytes = Vec::with_capacity(payload.len() + FRAMING_OVERHEAD);
    append_chunk(&mut bytes, chunk_type.as_bytes(), payload);
    Ok(bytes)
}

pub(crate) fn check_length(payload: &[u8]) -> Result<(), EncodingError> {
    if payload.len() > MAX_CHUNK_LENGTH {
        return Err(EncodingError::invalid(format!(
            "chunk payload of {} bytes exceeds the {MAX_CHUNK_LENGTH} byte limit",
            payload.len()
        )));
    }
    Ok(())
}

/// Callers must have checked the payload length already.
pub(crate) fn append_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    let mut crc = Crc32::new();
    crc.update(tag);
    crc.update(payload);
    out.extend((payload.len() as u32).to_be_bytes());
    out.extend(tag);
    out.extend(payload);
    out.extend(crc.finish().to_be_bytes());
    log::trace!(
        "framed {} chunk with {} byte payload",
        tag.escape_ascii(),
        payload.len()
    );
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub enum Chunk<'a> {
    IHDR(ihdr::IHDRChunk),
    IDAT(idat::IDATChunk<'a>),
    IEND,
    Unknown(RawChunk<'a>),
}

impl Chunk<'_> {
    pub fn chunk_type(&self) -> &[u8; 4] {
        match self {
            Self::IHDR(_) => ihdr::IHDRChunk::HEADER,
            Self::IDAT(_) => idat::IDATChunk::HEADER,
            Self::IEND => iend::IENDChunk::HEADER,
            Self::Unknown(raw) => raw.chunk_type,
        }
    }
}

#[derive(Debug)]
pub struct RawChunk<'a> {
    pub chunk_type: &'a [u8; 4],
    pub data: &'a [u8],
}

/// Walks the chunks that follow the signature, stopping after `IEND` or the
/// first chunk that is truncated or fails its CRC.
pub fn iter_chunks(source: &[u8]) -> ChunkIter<'_> {
    ChunkIter {
        source,
        finished: false,
    }
}

pub struct ChunkIter<'a> {
    source: &'a [u8],
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = anyhow::Result<Chunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match parse_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.source = rest;
                if matches!(chunk, Chunk::IEND) {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                let offset_hint = self.source.len();
                Some(Err(anyhow!(
                    "malformed chunk with {offset_hint} bytes left: {:?}",
                    e.map(|e| e.code)
                )))
            }
        }
    }
}

fn parse_chunk(input: &[u8]) -> IResult<&[u8], Chunk<'_>> {
    let (rest, (header, chunk_data)) = valid_chunk(input)?;
    let chunk = match header {
        ihdr::IHDRChunk::HEADER => Chunk::IHDR(ihdr::IHDRChunk::from_bytes(chunk_data)?.1),
        idat::IDATChunk::HEADER => Chunk::IDAT(idat::IDATChunk::from_bytes(chunk_data)?.1),
        iend::IENDChunk::HEADER => {
            iend::IENDChunk::from_bytes(chunk_data)?;
            Chunk::IEND
        }
        _ => Chunk::Unknown(RawChunk {
            chunk_type: header,
            data: chunk_data,
        }),
    };
    Ok((rest, chunk))
}

fn valid_chunk(input: &[u8]) -> IResult<&[u8], (&[u8; 4], &[u8])> {
    let (rest, length) = be_u32(input)?;
    let (rest, (chunk_type, data, crc)) = tuple((
        map_res(take(4usize), <&[u8; 4]>::try_from),
        take(length as usize),
        be_u32,
    ))(rest)?;
    let mut expected = Crc32::new();
    expected.update(chunk_type);
    expected.update(data);
    if expected.finish() != crc {
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::Verify)));
    }
    Ok((rest, (chunk_type, data)))
}

pub trait ParseableChunk<'a>: Sized {
    type Output: AsRef<[u8]>;
    const HEADER: &'static [u8; 4];

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self>;
    fn to_bytes(&self) -> Self::Output;
}
