use anyhow::Context;
use rgb_png::{Image, Pixel};
use std::{fs, path::PathBuf, time::Instant};

/// Launcher icon edge lengths across Android, iOS and the web manifest.
const SIZES: [u32; 19] = [
    48, 72, 96, 144, 192, 20, 29, 40, 58, 60, 76, 80, 87, 120, 152, 167, 180, 512, 1024,
];

fn test_pattern(size: u32) -> anyhow::Result<Vec<u8>> {
    let image = Image::from_fn(size, size, |x, y| {
        Pixel::new(
            (x * 255 / size) as u8,
            (y * 255 / size) as u8,
            ((x + y) % 256) as u8,
        )
    })?;
    Ok(image.encode()?)
}

fn main() -> anyhow::Result<()> {
    let args: Vec<_> = std::env::args().skip(1).collect();
    let verbosity = if args.iter().any(|arg| arg == "-v") {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .parse_default_env()
        .init();
    let output_dir = args
        .iter()
        .find(|arg| *arg != "-v")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("benchmark"));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut results = Vec::with_capacity(SIZES.len());
    for size in SIZES {
        let file_name = format!("pattern-{size}x{size}.png");
        let started = Instant::now();
        let outcome = test_pattern(size).and_then(|png| {
            let path = output_dir.join(&file_name);
            fs::write(&path, &png)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(png.len())
        });
        let millis = started.elapsed().as_secs_f64() * 1000.0;
        match outcome {
            Ok(bytes) => {
                log::info!("{file_name}: {bytes} bytes in {millis:.2}ms");
                results.push(serde_json::json!({
                    "size": size,
                    "file": file_name,
                    "bytes": bytes,
                    "millis": millis,
                }));
            }
            Err(e) => {
                log::error!("{size}x{size} failed: {e:#}");
                results.push(serde_json::json!({
                    "size": size,
                    "error": format!("{e:#}"),
                }));
            }
        }
    }

    let now = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)?;
    let report = serde_json::json!({
        "date": now,
        "results": results,
    });
    fs::write(output_dir.join("results.json"), report.to_string())?;
    Ok(())
}
