//! Show an image file's dimensions and its planned working size.

use std::path::PathBuf;

use snapbooth_capture_engine::BitmapSource;
use snapbooth_layout_core::{cap_width, LayoutConfig};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let bytes = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let bitmap = BitmapSource::from_encoded_bytes(&bytes)?;
    let dims = bitmap.dimensions();

    println!("Image: {}", path.display());
    println!("  Dimensions: {dims}");
    println!("  Aspect ratio: {:.4}", dims.aspect_ratio());
    println!("  Encoded size: {} bytes", bytes.len());

    let max_width = LayoutConfig::default().max_source_width;
    let capped = cap_width(dims, max_width);
    if capped == dims {
        println!("  Working size: {dims} (under the {max_width}px width cap)");
    } else {
        println!("  Working size: {capped} (capped from {dims})");
    }

    Ok(())
}
