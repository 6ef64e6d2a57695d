//! Minimal PNG encoder.
//!
//! Heatmaps use a four-entry legend, so every image is written in the
//! indexed form (color type 3) with 8-bit palette indices.

use std::io::Write;

use mineral_common::{Color, MineralError, MineralResult};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

fn check_dimensions(width: usize, height: usize) -> MineralResult<()> {
    if width == 0 || height == 0 {
        return Err(MineralError::RenderError(format!(
            "image must be at least 1x1, got {}x{}",
            width, height
        )));
    }
    if width > u32::MAX as usize || height > u32::MAX as usize {
        return Err(MineralError::RenderError(format!(
            "image {}x{} exceeds PNG limits",
            width, height
        )));
    }
    Ok(())
}

fn ihdr(width: usize, height: usize) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&(width as u32).to_be_bytes());
    data[4..8].copy_from_slice(&(height as u32).to_be_bytes());
    data[8] = 8; // bit depth
    data[9] = 3; // indexed color
    // compression, filter and interlace methods stay 0
    data
}

/// Create an indexed PNG (color type 3) from a palette and one index per
/// pixel.
///
/// A `tRNS` chunk is only written when some palette entry is not opaque.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[Color],
    indices: &[u8],
) -> MineralResult<Vec<u8>> {
    check_dimensions(width, height)?;
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(MineralError::RenderError(format!(
            "palette must have 1-{} entries, got {}",
            MAX_PALETTE_SIZE,
            palette.len()
        )));
    }
    if indices.len() != width * height {
        return Err(MineralError::RenderError(format!(
            "expected {} palette indices, got {}",
            width * height,
            indices.len()
        )));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= palette.len()) {
        return Err(MineralError::RenderError(format!(
            "palette index {} out of range for {} colors",
            bad,
            palette.len()
        )));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height));

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.iter().any(|c| c.a < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c.a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width, height)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk: length, type, data, CRC over type and data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix every scanline with filter byte 0 and zlib-compress.
fn deflate_scanlines(indices: &[u8], width: usize, height: usize) -> MineralResult<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + width));
    for row in indices.chunks_exact(width).take(height) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    let compression_failed =
        |e: std::io::Error| MineralError::RenderError(format!("IDAT compression failed: {}", e));
    encoder.write_all(&uncompressed).map_err(compression_failed)?;
    encoder.finish().map_err(compression_failed)
}
