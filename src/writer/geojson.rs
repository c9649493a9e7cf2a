use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde_json::{Value, json};

use crate::contour::{AREA_FIELD, CatchmentPolygon};
use crate::error::PolygonizeError;

/// Writes a single-feature FeatureCollection. The geometry is serialized
/// by OGR's GeoJSON export, so polygon and multipolygon results both come
/// out as standard GeoJSON geometries.
pub fn write(polygon: &CatchmentPolygon, path: &Path) -> Result<(), PolygonizeError> {
    let geometry: Value = serde_json::from_str(&polygon.geometry().json()?)?;

    let collection = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                (AREA_FIELD): polygon.area_km2(),
            },
        }],
    });

    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &collection)?;

    Ok(())
}
