use std::path::{Path, PathBuf};

use rand::Rng;

use crate::config::VectorFormat;
use crate::contour::CatchmentPolygon;
use crate::error::PolygonizeError;

pub mod geojson;
pub mod kml;

/// Source of synthesized output file names (without extension).
///
/// Injected so the persistence path stays deterministic under test; the
/// production implementation is [`RandomNamer`].
pub trait FileNamer {
    fn generate(&self) -> String;
}

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// 10 random lowercase-alphanumeric characters.
pub struct RandomNamer;

impl FileNamer for RandomNamer {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..10)
            .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
            .collect()
    }
}

/// Resolves the output path: synthesizes a name when none is given, and
/// appends the format extension unless the path already ends with it.
pub fn resolve_path(
    path: Option<&Path>,
    format: VectorFormat,
    namer: &dyn FileNamer,
) -> PathBuf {
    let extension = format.extension();

    match path {
        None => PathBuf::from(format!("{}.{}", namer.generate(), extension)),
        Some(path) => {
            let raw = path.to_string_lossy();
            if raw.ends_with(&format!(".{}", extension)) {
                path.to_path_buf()
            } else {
                PathBuf::from(format!("{}.{}", raw, extension))
            }
        }
    }
}

/// Writes the polygon feature in the requested vector format.
pub fn write(
    polygon: &CatchmentPolygon,
    path: &Path,
    format: VectorFormat,
) -> Result<(), PolygonizeError> {
    match format {
        VectorFormat::Geojson => geojson::write(polygon, path),
        VectorFormat::Kml => kml::write(polygon, path),
    }
}
