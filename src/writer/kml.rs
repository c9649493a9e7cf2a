use std::path::Path;

use gdal::DriverManager;
use gdal::vector::{
    FieldValue, Geometry, LayerAccess, LayerOptions, OGRFieldType, OGRwkbGeometryType,
};

use crate::contour::{AREA_FIELD, CatchmentPolygon};
use crate::error::PolygonizeError;
use crate::projection;

/// Hands the polygon off to the OGR KML driver: one layer, one feature
/// carrying the area attribute.
pub fn write(polygon: &CatchmentPolygon, path: &Path) -> Result<(), PolygonizeError> {
    let driver = DriverManager::get_driver_by_name("KML")?;
    let mut dataset = driver.create_vector_only(path)?;

    let srs = projection::geographic()?;
    let mut layer = dataset.create_layer(LayerOptions {
        name: "catchment",
        srs: Some(&srs),
        ty: OGRwkbGeometryType::wkbPolygon,
        ..Default::default()
    })?;

    layer.create_defn_fields(&[(AREA_FIELD, OGRFieldType::OFTReal)])?;

    // OGR takes ownership of the feature geometry, so hand it a copy.
    let geometry = Geometry::from_wkt(&polygon.geometry().wkt()?)?;
    layer.create_feature_fields(
        geometry,
        &[AREA_FIELD],
        &[FieldValue::RealValue(polygon.area_km2())],
    )?;

    dataset.flush_cache()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::{ExtractOptions, extract};
    use crate::membership::MembershipGrid;
    use crate::profile::RasterProfile;
    use crate::rasterize::rasterize;

    #[test]
    fn test_kml_document_written() {
        #[rustfmt::skip]
        let grid = MembershipGrid::new(3, 3, vec![
            0, 0, 0,
            0, 1, 0,
            0, 0, 0,
        ])
        .unwrap();
        let profile =
            RasterProfile::new(3, 3, [10.0, 1.0, 0.0, 44.0, 0.0, -1.0], "EPSG:4326").unwrap();
        let raster = rasterize(&grid, &profile).unwrap();
        let polygon = extract(&raster, &ExtractOptions::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catchment.kml");

        write(&polygon, &path).unwrap();

        let document = std::fs::read_to_string(&path).unwrap();
        assert!(document.contains("<kml"));
        assert!(document.contains("Polygon"));
    }
}
