use anyhow::{Context, Result};
use image::Luma;
use qrcode::QrCode;
use std::path::Path;

/// Render `content` as a QR PNG at `path`. The file is written at most once:
/// if it already exists the render is skipped entirely. Returns whether a new
/// file was written.
pub fn render_to_file(content: &str, path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    let code = QrCode::new(content.as_bytes()).context("QR code generation failed")?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(200, 200)
        .quiet_zone(true)
        .build();
    image
        .save(path)
        .with_context(|| format!("Failed to write QR image to {}", path.display()))?;

    Ok(true)
}
