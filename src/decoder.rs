use anyhow::{anyhow, bail, Context};

use crate::chunks::{ihdr::IHDRChunk, iter_chunks, Chunk, ChunkIter};

/// Reads chunks in the order a PNG requires: signature, `IHDR`, then image
/// data up to `IEND`.
pub(crate) struct PNGDecoder<'a, State> {
    chunks: ChunkIter<'a>,
    state: State,
}

pub(crate) struct Start;
pub(crate) struct Header(IHDRChunk);

impl<'a> PNGDecoder<'a, Start> {
    pub(crate) fn new(data: &'a [u8]) -> anyhow::Result<Self> {
        let (rest, _) = crate::parse_signature(data)
            .map_err(|_| anyhow!("input doesn't start with expected signature"))?;
        Ok(Self {
            chunks: iter_chunks(rest),
            state: Start,
        })
    }

    pub(crate) fn parse_ihdr(mut self) -> anyhow::Result<PNGDecoder<'a, Header>> {
        match self.chunks.next() {
            Some(Ok(Chunk::IHDR(header))) => Ok(PNGDecoder {
                chunks: self.chunks,
                state: Header(header),
            }),
            Some(Ok(other)) => bail!(
                "expected IHDR as the first chunk, found {}",
                other.chunk_type().escape_ascii()
            ),
            Some(Err(e)) => Err(e.context("Failed to read IHDR")),
            None => bail!("missing IHDR"),
        }
    }
}

impl<'a> PNGDecoder<'a, Header> {
    /// Concatenates the run of consecutive `IDAT` payloads, skipping ancillary
    /// chunks around it. Fails on a split run, unknown critical chunks or a
    /// missing `IEND`.
    pub(crate) fn read_image_data(self) -> anyhow::Result<(IHDRChunk, Vec<u8>)> {
        let Header(header) = self.state;
        let mut compressed = vec![];
        let mut idat_run_ended = false;
        for chunk in self.chunks {
            match chunk.context("Failed to read chunk after IHDR")? {
                Chunk::IDAT(_) if idat_run_ended => bail!("IDAT chunks must be consecutive"),
                Chunk::IDAT(idat) => compressed.extend_from_slice(idat.data),
                Chunk::IEND => {
                    if compressed.is_empty() {
                        bail!("Couldn't find an IDAT");
                    }
                    return Ok((header, compressed));
                }
                Chunk::IHDR(_) => bail!("duplicate IHDR"),
                Chunk::Unknown(raw) if raw.chunk_type[0].is_ascii_lowercase() => {
                    idat_run_ended = !compressed.is_empty();
                    log::debug!("skipping ancillary {} chunk", raw.chunk_type.escape_ascii());
                }
                Chunk::Unknown(raw) => {
                    bail!("unsupported critical chunk {}", raw.chunk_type.escape_ascii())
                }
            }
        }
        bail!("missing IEND")
    }
}
