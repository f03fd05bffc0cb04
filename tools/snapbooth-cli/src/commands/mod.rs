//! Subcommand implementations.

pub mod check;
pub mod import;
pub mod inspect;
pub mod snap;

use snapbooth_layout_core::LayoutMode;
use snapbooth_photo_model::{FacingMode, OutputFormat};

pub(crate) fn parse_mode(mode: &str, mirror: bool) -> anyhow::Result<LayoutMode> {
    match mode {
        "mirror" => Ok(LayoutMode::MirrorCanvas),
        "template" => Ok(LayoutMode::TemplateFrame { mirror }),
        _ => Err(anyhow::anyhow!("Unknown mode: {mode}. Use: mirror, template")),
    }
}

pub(crate) fn parse_facing(facing: &str) -> anyhow::Result<FacingMode> {
    match facing {
        "user" => Ok(FacingMode::User),
        "environment" => Ok(FacingMode::Environment),
        _ => Err(anyhow::anyhow!(
            "Unknown facing: {facing}. Use: user, environment"
        )),
    }
}

pub(crate) fn parse_format(format: &str, quality: u8) -> anyhow::Result<OutputFormat> {
    match format {
        "jpeg" | "jpg" => Ok(OutputFormat::Jpeg { quality }),
        "png" => Ok(OutputFormat::Png),
        _ => Err(anyhow::anyhow!("Unknown format: {format}. Use: jpeg, png")),
    }
}

pub(crate) fn parse_size(size: &str) -> anyhow::Result<(u32, u32)> {
    let (w, h) = size
        .split_once('x')
        .ok_or_else(|| anyhow::anyhow!("Size must look like 1280x720, got: {size}"))?;
    let width = w
        .parse()
        .map_err(|_| anyhow::anyhow!("Bad width in size: {size}"))?;
    let height = h
        .parse()
        .map_err(|_| anyhow::anyhow!("Bad height in size: {size}"))?;
    Ok((width, height))
}
