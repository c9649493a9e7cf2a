use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use gdal::vector::Geometry;

use crate::error::PolygonizeError;

/// Cylindrical Equal Area, meter units. Used transiently for area
/// measurement only.
const CEA_PROJ4: &str = "+proj=cea +lon_0=0 +lat_ts=0 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs";

pub fn equal_area() -> Result<SpatialRef, PolygonizeError> {
    SpatialRef::from_proj4(CEA_PROJ4).map_err(|e| {
        PolygonizeError::CoordinateSystem(format!("Failed to build equal-area CRS: {}", e))
    })
}

/// EPSG:4326 with lon/lat axis order.
pub fn geographic() -> Result<SpatialRef, PolygonizeError> {
    let mut srs = SpatialRef::from_epsg(4326).map_err(|e| {
        PolygonizeError::CoordinateSystem(format!("Failed to build EPSG:4326: {}", e))
    })?;
    srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

/// Reprojects a geometry in place. Axis order is pinned to x/y on both
/// sides so authority-compliant CRS definitions do not swap coordinates.
pub fn reproject(
    geometry: &mut Geometry,
    from: &SpatialRef,
    to: &SpatialRef,
) -> Result<(), PolygonizeError> {
    let mut from = from.clone();
    from.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    let mut to = to.clone();
    to.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

    let transform = CoordTransform::new(&from, &to).map_err(|e| {
        PolygonizeError::CoordinateSystem(format!("Failed to build transform: {}", e))
    })?;

    geometry
        .transform_inplace(&transform)
        .map_err(|e| PolygonizeError::CoordinateSystem(format!("Reprojection failed: {}", e)))
}

/// Area of a geometry lying in a meter-based frame, in km² rounded to two
/// decimals.
pub fn area_km2(geometry: &Geometry) -> f64 {
    (geometry.area() / 1.0e6 * 100.0).round() / 100.0
}
