//! Tests for heatmap rendering and PNG output.
//!
//! Decodes the produced PNG chunks by hand so the palette and the pixel
//! indices can be checked against the legend.

use std::io::Read;

use mineral_common::{Color, Legend};
use renderer::{create_png_indexed, render_heatmap, ValueScale};
use test_utils::horizontal_gradient;

// ============================================================================
// Helper functions
// ============================================================================

struct Chunk {
    kind: String,
    data: Vec<u8>,
}

fn read_chunks(png: &[u8]) -> Vec<Chunk> {
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    let mut chunks = Vec::new();
    let mut pos = 8;
    while pos + 12 <= png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let kind = String::from_utf8(png[pos + 4..pos + 8].to_vec()).unwrap();
        let data = png[pos + 8..pos + 8 + len].to_vec();

        let crc = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());
        assert_eq!(crc, crc32fast::hash(&png[pos + 4..pos + 8 + len]), "bad CRC in {}", kind);

        chunks.push(Chunk { kind, data });
        pos += 12 + len;
    }
    chunks
}

/// Palette indices per row, with the filter bytes stripped.
fn decode_indexed(png: &[u8]) -> (usize, usize, Vec<[u8; 3]>, Vec<u8>) {
    let chunks = read_chunks(png);
    let ihdr = &chunks[0];
    assert_eq!(ihdr.kind, "IHDR");
    let width = u32::from_be_bytes(ihdr.data[0..4].try_into().unwrap()) as usize;
    let height = u32::from_be_bytes(ihdr.data[4..8].try_into().unwrap()) as usize;
    assert_eq!(ihdr.data[9], 3, "expected indexed color type");

    let plte = chunks.iter().find(|c| c.kind == "PLTE").unwrap();
    let palette = plte.data.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

    let idat: Vec<u8> = chunks
        .iter()
        .filter(|c| c.kind == "IDAT")
        .flat_map(|c| c.data.clone())
        .collect();
    let mut raw = Vec::new();
    flate2::read::ZlibDecoder::new(&idat[..])
        .read_to_end(&mut raw)
        .unwrap();
    assert_eq!(raw.len(), height * (width + 1));

    let indices = raw
        .chunks_exact(width + 1)
        .flat_map(|row| {
            assert_eq!(row[0], 0, "filter byte");
            row[1..].to_vec()
        })
        .collect();

    (width, height, palette, indices)
}

// ============================================================================
// Legend colors
// ============================================================================

#[test]
fn test_palette_matches_legend() {
    let heatmap = render_heatmap(&[0.1, 0.3, 0.6, 0.9], 4, 1, ValueScale::Normalized).unwrap();
    let png = heatmap.to_png().unwrap();
    let (w, h, palette, indices) = decode_indexed(&png);

    assert_eq!((w, h), (4, 1));
    assert_eq!(
        palette,
        vec![[255, 255, 153], [255, 255, 0], [255, 165, 0], [255, 0, 0]]
    );
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn test_percent_scores_bucket_like_grid() {
    let scores = [0.0, 24.9, 25.0, 65.0, 80.0, 100.0];
    let normalized: Vec<f32> = scores.iter().map(|s| s / 100.0).collect();

    let a = render_heatmap(&scores, 6, 1, ValueScale::Percent).unwrap();
    let b = render_heatmap(&normalized, 6, 1, ValueScale::Normalized).unwrap();
    assert_eq!(a.indices, b.indices);
    assert_eq!(a.indices, vec![0, 0, 1, 2, 3, 3]);
}

#[test]
fn test_out_of_range_values_clamped() {
    let values = [f32::NAN, -5.0, f32::INFINITY, 3.0];
    let heatmap = render_heatmap(&values, 2, 2, ValueScale::Normalized).unwrap();
    assert_eq!(heatmap.indices, vec![0, 0, 3, 3]);

    let (_, _, palette, indices) = decode_indexed(&heatmap.to_png().unwrap());
    assert_eq!(palette[indices[2] as usize], [255, 0, 0]);
    assert_eq!(palette[indices[0] as usize], [255, 255, 153]);
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_one_pixel_per_cell_row_major() {
    let raster = horizontal_gradient(8, 3, 100.0);
    let heatmap = render_heatmap(&raster.data, 8, 3, ValueScale::Percent).unwrap();
    let (w, h, _, indices) = decode_indexed(&heatmap.to_png().unwrap());

    assert_eq!((w, h), (8, 3));
    assert_eq!(indices, heatmap.indices);
    for row in indices.chunks(8) {
        assert_eq!(row[0], 0);
        assert_eq!(row[7], 3);
        assert!(row.windows(2).all(|p| p[0] <= p[1]));
    }
}

#[test]
fn test_histogram_counts_bands() {
    let heatmap = render_heatmap(&[0.0, 1.0, 0.3, 0.9], 2, 2, ValueScale::Normalized).unwrap();
    assert_eq!(heatmap.histogram(), vec![1, 1, 0, 2]);
}

#[test]
fn test_scattered_scores_decode_exactly() {
    let values: Vec<f32> = (0..64 * 64).map(|i| ((i * 37) % 101) as f32).collect();
    let heatmap = render_heatmap(&values, 64, 64, ValueScale::Percent).unwrap();

    let (w, h, _, indices) = decode_indexed(&heatmap.to_png().unwrap());
    assert_eq!((w, h), (64, 64));
    assert_eq!(indices, heatmap.indices);
}

#[test]
fn test_custom_palette_png() {
    let palette = Legend::potential().palette();
    let png = create_png_indexed(1, 1, &palette, &[2]).unwrap();
    let (_, _, decoded, indices) = decode_indexed(&png);
    assert_eq!(decoded[2], [255, 165, 0]);
    assert_eq!(indices, vec![2]);
    assert_eq!(palette[2], Color::rgb(255, 165, 0));
}
