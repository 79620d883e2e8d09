use rgb_png::{
    chunks::{iter_chunks, Chunk},
    encode, parse_signature, Encoder, Image, Pixel, ZlibCompressor, SIGNATURE,
};

fn decode_with_png_crate(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
    let decoder = png::Decoder::new(bytes);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    (info, buf)
}

fn checkerboard(width: u32, height: u32) -> Vec<Pixel> {
    (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if (x + y) % 2 == 0 {
                    Pixel::new(x as u8, 200, y as u8)
                } else {
                    Pixel::new(17, (x * y) as u8, 255)
                }
            })
        })
        .collect()
}

/// Splits a file into (type, payload, stored crc) without trusting the crate's
/// own reader.
fn raw_chunks(mut bytes: &[u8]) -> Vec<([u8; 4], Vec<u8>, u32)> {
    let mut chunks = vec![];
    while !bytes.is_empty() {
        let length = u32::from_be_bytes(bytes[0..4].try_into().unwrap()) as usize;
        let chunk_type: [u8; 4] = bytes[4..8].try_into().unwrap();
        let payload = bytes[8..8 + length].to_vec();
        let crc = u32::from_be_bytes(bytes[8 + length..12 + length].try_into().unwrap());
        chunks.push((chunk_type, payload, crc));
        bytes = &bytes[12 + length..];
    }
    chunks
}

#[test]
fn standard_decoder_reads_back_every_pixel() {
    for (width, height) in [(1, 1), (2, 3), (48, 48), (97, 5), (5, 97)] {
        let pixels = checkerboard(width, height);
        let bytes = encode(width, height, pixels.clone()).unwrap();

        let (info, data) = decode_with_png_crate(&bytes);
        assert_eq!((info.width, info.height), (width, height));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        let expected: Vec<u8> = pixels.iter().flat_map(|p| p.to_bytes()).collect();
        assert_eq!(data, expected);
    }
}

#[test]
fn encoding_is_deterministic() {
    let pixels = checkerboard(31, 17);
    let first = encode(31, 17, pixels.clone()).unwrap();
    let second = encode(31, 17, pixels).unwrap();
    assert_eq!(first, second);
}

#[test]
fn output_is_signature_and_three_valid_chunks() {
    let bytes = encode(16, 9, checkerboard(16, 9)).unwrap();
    assert_eq!(bytes[..8], SIGNATURE);
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let chunks = raw_chunks(&bytes[8..]);
    let types: Vec<_> = chunks.iter().map(|(t, _, _)| t).collect();
    assert_eq!(types, [b"IHDR", b"IDAT", b"IEND"]);
    for (chunk_type, payload, crc) in &chunks {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(chunk_type);
        hasher.update(payload);
        assert_eq!(hasher.finalize(), *crc, "{:?}", chunk_type.escape_ascii());
    }
    assert!(chunks[2].1.is_empty());
}

#[test]
fn header_for_launcher_icon_size() {
    let bytes = encode(48, 48, vec![Pixel::new(255, 107, 53); 48 * 48]).unwrap();
    let chunks = raw_chunks(&bytes[8..]);
    let (_, payload, _) = &chunks[0];
    assert_eq!(payload.len(), 13);
    assert_eq!(u32::from_be_bytes(payload[0..4].try_into().unwrap()), 48);
    assert_eq!(u32::from_be_bytes(payload[4..8].try_into().unwrap()), 48);
    assert_eq!(payload[8..], [8, 2, 0, 0, 0]);

    let hex: String = bytes[8..33].iter().map(|b| format!("{b:02x}")).collect();
    insta::assert_snapshot!(hex, @"0000000d4948445200000030000000300802000000d8606ed0");
}

#[test]
fn single_red_pixel() {
    let bytes = encode(1, 1, [(255, 0, 0)]).unwrap();
    let (info, data) = decode_with_png_crate(&bytes);
    assert_eq!((info.width, info.height), (1, 1));
    assert_eq!(data, [255, 0, 0]);

    let image = Image::decode(&bytes).unwrap();
    assert_eq!(image.get(0, 0), Some(Pixel::new(255, 0, 0)));
}

#[test]
fn short_pixel_source_fails_before_output() {
    let mut sink = Vec::new();
    let error = Encoder::new()
        .encode_to(&mut sink, 10, 10, vec![Pixel::default(); 99])
        .unwrap_err();
    assert!(error.is_invalid_argument(), "{error}");
    assert!(sink.is_empty());
}

#[test]
fn bad_dimensions_are_invalid_arguments() {
    assert!(encode(0, 10, Vec::<Pixel>::new())
        .unwrap_err()
        .is_invalid_argument());
    assert!(encode(10, 0, Vec::<Pixel>::new())
        .unwrap_err()
        .is_invalid_argument());
}

#[test]
fn wide_channel_values_wrap_to_eight_bits() {
    let bytes = encode(2, 1, [(256, -1, 300), (0, 128, 255)]).unwrap();
    let (_, data) = decode_with_png_crate(&bytes);
    assert_eq!(data, [0, 255, 44, 0, 128, 255]);
}

#[test]
fn compression_level_does_not_change_pixels() {
    let pixels = checkerboard(40, 40);
    let stored = Encoder::with_compressor(ZlibCompressor::new(0))
        .encode(40, 40, pixels.clone())
        .unwrap();
    let best = Encoder::with_compressor(ZlibCompressor::new(10))
        .encode(40, 40, pixels)
        .unwrap();
    assert!(best.len() < stored.len());
    assert_eq!(decode_with_png_crate(&stored).1, decode_with_png_crate(&best).1);
}

#[test]
fn crate_reader_walks_encoded_output() {
    let bytes = encode(3, 3, checkerboard(3, 3)).unwrap();
    let (rest, _) = parse_signature(&bytes).unwrap();
    let chunks: Vec<_> = iter_chunks(rest).collect::<anyhow::Result<_>>().unwrap();
    assert!(matches!(
        chunks.as_slice(),
        [Chunk::IHDR(_), Chunk::IDAT(_), Chunk::IEND]
    ));
}

#[test]
fn independent_images_encode_concurrently() {
    let handles: Vec<_> = (1..=8u32)
        .map(|size| {
            std::thread::spawn(move || {
                let pixels = checkerboard(size, size);
                (size, encode(size, size, pixels).unwrap())
            })
        })
        .collect();
    for handle in handles {
        let (size, bytes) = handle.join().unwrap();
        assert_eq!(bytes, encode(size, size, checkerboard(size, size)).unwrap());
    }
}
