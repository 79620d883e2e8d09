use anyhow::{bail, ensure, Context};
use rgb_png::{Encoder, Pixel, ZlibCompressor};

const USAGE: &str = "usage: encode-raw [-v] [-l LEVEL] <WIDTH> <HEIGHT> <INPUT.rgb> [OUTPUT.png]";

fn main() -> anyhow::Result<()> {
    let mut verbosity = log::LevelFilter::Error;
    let mut level = ZlibCompressor::DEFAULT_LEVEL;
    let mut positional = vec![];
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" => verbosity = log::LevelFilter::Info,
            "-l" => {
                let value = args.next().context("-l needs a compression level")?;
                level = value
                    .parse()
                    .with_context(|| format!("invalid compression level {value:?}"))?;
            }
            _ => positional.push(arg),
        }
    }
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .parse_default_env()
        .init();

    let [width, height, input, rest @ ..] = positional.as_slice() else {
        bail!(USAGE);
    };
    ensure!(rest.len() <= 1, USAGE);
    let output = rest.first().map(String::as_str).unwrap_or("output.png");
    let width: u32 = width
        .parse()
        .with_context(|| format!("invalid width {width:?}"))?;
    let height: u32 = height
        .parse()
        .with_context(|| format!("invalid height {height:?}"))?;

    let data = std::fs::read(input).with_context(|| format!("Failed to read {input}"))?;
    ensure!(
        data.len() % 3 == 0,
        "{input} holds {} bytes, which is not a whole number of RGB pixels",
        data.len()
    );
    let pixels = data
        .chunks_exact(3)
        .map(|rgb| Pixel::new(rgb[0], rgb[1], rgb[2]));
    let png = Encoder::with_compressor(ZlibCompressor::new(level))
        .encode(width, height, pixels)
        .with_context(|| format!("Failed to encode {input}"))?;
    std::fs::write(output, &png).with_context(|| format!("Failed to write {output}"))?;
    log::info!(
        "wrote {width}x{height} image to {output} ({} bytes)",
        png.len()
    );
    Ok(())
}
