//! PNG export functionality for terrain heightfields.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};
use thiserror::Error;

use crate::terrain::Heightfield;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid height range: min ({0}) >= max ({1})")]
    InvalidHeightRange(f32, f32),
    #[error("Heightfield of size {0} cannot be written as an image")]
    InvalidSize(usize),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Height mapped to black.
    pub min_height: f32,
    /// Height mapped to white.
    pub max_height: f32,
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_height: -8.0,
            max_height: 8.0,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Creates options spanning the heightfield's own range.
    ///
    /// A flat field gets a unit-wide range so it still exports.
    pub fn auto_range(field: &Heightfield) -> Self {
        let (min, max) = field.height_range().unwrap_or((0.0, 1.0));
        let max = if max > min { max } else { min + 1.0 };
        Self {
            min_height: min,
            max_height: max,
            ..Default::default()
        }
    }
}

/// Maps `height` into the 16-bit range given by `[min, max]`.
fn quantize(height: f32, min: f32, max: f32) -> u16 {
    let normalized = ((height - min) / (max - min)).clamp(0.0, 1.0);
    (normalized * 65535.0) as u16
}

/// Exports a heightfield as a 16-bit grayscale PNG.
///
/// Image X follows grid index `i` (world X), image Y follows `j` (world Z).
///
/// # Arguments
/// * `field` - The heightfield to export
/// * `path` - Output file path
/// * `options` - Height range and encoder settings
pub fn export_heightfield_png(
    field: &Heightfield,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let min = options.min_height;
    let max = options.max_height;
    if min >= max {
        return Err(PngExportError::InvalidHeightRange(min, max));
    }

    let size = field.size();
    let resolution = match u32::try_from(size) {
        Ok(r) if r > 0 => r,
        _ => return Err(PngExportError::InvalidSize(size)),
    };

    let img: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_fn(resolution, resolution, |x, y| {
            Luma([quantize(field.get(x as usize, y as usize), min, max)])
        });

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(
        byte_slice,
        resolution,
        resolution,
        image::ExtendedColorType::L16,
    )?;

    log::debug!("Wrote {}x{} heightmap to {}", resolution, resolution, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FbmConfig;
    use crate::terrain::{TerrainBuilder, TerrainConfig};
    use tempfile::tempdir;

    #[test]
    fn test_export_heightfield_png() {
        let field = TerrainBuilder::new(TerrainConfig::seeded(42)).build_heightfield(64);
        let dir = tempdir().unwrap();
        let path = dir.path().join("terrain.png");

        export_heightfield_png(&field, &path, &PngExportOptions::auto_range(&field)).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 64);
        assert_eq!(img.color(), image::ColorType::L16);
    }

    #[test]
    fn test_auto_range_covers_full_scale() {
        let field = TerrainBuilder::new(TerrainConfig::seeded(7)).build_heightfield(32);
        let options = PngExportOptions::auto_range(&field);
        let (min, max) = field.height_range().unwrap();
        assert_eq!(options.min_height, min);
        assert_eq!(options.max_height, max);
        assert_eq!(quantize(min, min, max), 0);
        assert_eq!(quantize(max, min, max), 65535);
    }

    #[test]
    fn test_flat_field_auto_range() {
        let builder = TerrainBuilder::new(TerrainConfig {
            fbm: FbmConfig::with_octaves(0),
            ..TerrainConfig::seeded(1)
        });
        let field = builder.build_heightfield(8);
        let options = PngExportOptions::auto_range(&field);
        assert!(options.max_height > options.min_height);

        let dir = tempdir().unwrap();
        export_heightfield_png(&field, &dir.path().join("flat.png"), &options).unwrap();
    }

    #[test]
    fn test_invalid_height_range() {
        let field = TerrainBuilder::new(TerrainConfig::seeded(1)).build_heightfield(4);
        let dir = tempdir().unwrap();
        let options = PngExportOptions {
            min_height: 1.0,
            max_height: -1.0,
            ..Default::default()
        };
        let result = export_heightfield_png(&field, &dir.path().join("bad.png"), &options);
        assert!(matches!(result, Err(PngExportError::InvalidHeightRange(_, _))));
    }

    #[test]
    fn test_empty_field_rejected() {
        let field = TerrainBuilder::new(TerrainConfig::seeded(1)).build_heightfield(0);
        let dir = tempdir().unwrap();
        let result =
            export_heightfield_png(&field, &dir.path().join("empty.png"), &PngExportOptions::default());
        assert!(matches!(result, Err(PngExportError::InvalidSize(0))));
    }

    #[test]
    fn test_quantize_clamps() {
        assert_eq!(quantize(-10.0, -1.0, 1.0), 0);
        assert_eq!(quantize(10.0, -1.0, 1.0), 65535);
        assert_eq!(quantize(0.0, -1.0, 1.0), 32767);
    }
}
