use std::path::PathBuf;

use gdal::Dataset;
use gdal::vector::{Geometry, OGRwkbGeometryType};
use serde::Deserialize;

use crate::config::VectorFormat;
use crate::error::PolygonizeError;
use crate::membership::MembershipGrid;
use crate::projection;
use crate::writer::{self, RandomNamer};

pub mod trace;

/// Attribute name carried by every persisted feature.
pub const AREA_FIELD: &str = "CalculatedArea[km2]";

/// What to do when the mask holds more than one disjoint region.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RegionPolicy {
    /// Keep the first region in trace order, discard the rest.
    #[serde(rename(deserialize = "first"))]
    First,
    /// Union every region into a multipolygon.
    #[serde(rename(deserialize = "merge"))]
    Merge,
    /// Fail with MultipleRegionsFound.
    #[serde(rename(deserialize = "strict"))]
    Strict,
}

impl Default for RegionPolicy {
    fn default() -> Self {
        RegionPolicy::First
    }
}

#[derive(Debug, Clone)]
pub struct PersistOptions {
    /// Output path; a random name is synthesized when absent, and the
    /// format extension is appended when missing.
    pub path: Option<PathBuf>,
    pub format: VectorFormat,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub policy: RegionPolicy,
    pub persist: Option<PersistOptions>,
}

/// Catchment boundary in EPSG:4326 with its area measured in an equal-area
/// frame.
#[derive(Debug)]
pub struct CatchmentPolygon {
    geometry: Geometry,
    area_km2: f64,
}

impl CatchmentPolygon {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn area_km2(&self) -> f64 {
        self.area_km2
    }
}

/// Traces the 1-valued region of a binary raster into a polygon.
///
/// Band 1 is read back as a membership grid, its 8-connected regions are
/// traced into exterior rings, and the ring(s) selected by the region
/// policy become the result geometry. Area is measured after reprojecting
/// into a Cylindrical Equal Area frame; the geometry itself is delivered
/// in EPSG:4326. With persistence requested, the feature is also written
/// in the chosen vector format before returning; a write failure fails
/// the call.
///
/// Takes no locks and keeps no state between calls; concurrent use is fine
/// as long as every call gets its own dataset.
pub fn extract(
    raster: &Dataset,
    options: &ExtractOptions,
) -> Result<CatchmentPolygon, PolygonizeError> {
    let (width, height) = raster.raster_size();
    let transform = raster.geo_transform()?;
    let srs = raster.spatial_ref().map_err(|e| {
        PolygonizeError::CoordinateSystem(format!("Raster has no usable CRS: {}", e))
    })?;

    let band = raster.rasterband(1)?;
    let buffer = band.read_as::<u8>((0, 0), (width, height), (width, height), None)?;
    let grid = MembershipGrid::new(width, height, buffer.data().to_vec())?;

    let rings = trace::trace_regions(&grid);
    if rings.is_empty() {
        return Err(PolygonizeError::NoGeometryFound);
    }

    let mut geometry = match options.policy {
        RegionPolicy::First => ring_to_polygon(&rings[0], &transform)?,
        RegionPolicy::Strict => {
            if rings.len() > 1 {
                return Err(PolygonizeError::MultipleRegionsFound(rings.len()));
            }
            ring_to_polygon(&rings[0], &transform)?
        }
        RegionPolicy::Merge => {
            let mut multi = Geometry::empty(OGRwkbGeometryType::wkbMultiPolygon)?;
            for ring in &rings {
                multi.add_geometry(ring_to_polygon(ring, &transform)?)?;
            }
            multi
        }
    };
    geometry.set_spatial_ref(srs.clone());

    let equal_area = projection::equal_area()?;
    projection::reproject(&mut geometry, &srs, &equal_area)?;
    let area_km2 = projection::area_km2(&geometry);

    let geographic = projection::geographic()?;
    projection::reproject(&mut geometry, &equal_area, &geographic)?;
    geometry.set_spatial_ref(geographic);

    let polygon = CatchmentPolygon { geometry, area_km2 };

    if let Some(persist) = &options.persist {
        let path = writer::resolve_path(persist.path.as_deref(), persist.format, &RandomNamer);
        writer::write(&polygon, &path, persist.format)?;
    }

    Ok(polygon)
}

/// Maps a pixel-corner ring through the affine transform and wraps it into
/// a single-ring polygon.
fn ring_to_polygon(
    ring: &[(usize, usize)],
    transform: &[f64; 6],
) -> Result<Geometry, PolygonizeError> {
    let mut linear_ring = Geometry::empty(OGRwkbGeometryType::wkbLinearRing)?;
    for &(col, row) in ring {
        linear_ring.add_point_2d(crate::profile::apply_transform(
            transform, col as f64, row as f64,
        ));
    }

    let mut polygon = Geometry::empty(OGRwkbGeometryType::wkbPolygon)?;
    polygon.add_geometry(linear_ring)?;
    Ok(polygon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::RasterProfile;
    use crate::rasterize::rasterize;

    fn degree_profile(height: usize, width: usize) -> RasterProfile {
        RasterProfile::new(
            height,
            width,
            [10.0, 1.0, 0.0, 44.0, 0.0, -1.0],
            "EPSG:4326",
        )
        .unwrap()
    }

    fn centered_block_raster() -> Dataset {
        #[rustfmt::skip]
        let grid = MembershipGrid::new(4, 4, vec![
            0, 0, 0, 0,
            0, 1, 1, 0,
            0, 1, 1, 0,
            0, 0, 0, 0,
        ])
        .unwrap();

        rasterize(&grid, &degree_profile(4, 4)).unwrap()
    }

    #[test]
    fn test_centered_block_polygon() {
        let raster = centered_block_raster();
        let polygon = extract(&raster, &ExtractOptions::default()).unwrap();

        let ring = polygon.geometry().get_geometry(0);
        let points = ring.get_point_vec();

        // 4 corners plus the closing vertex
        assert_eq!(points.len(), 5);

        let expected = [
            (11.0, 43.0),
            (13.0, 43.0),
            (13.0, 41.0),
            (11.0, 41.0),
            (11.0, 43.0),
        ];
        for (point, exp) in points.iter().zip(expected.iter()) {
            assert!((point.0 - exp.0).abs() < 1e-6, "{:?} vs {:?}", point, exp);
            assert!((point.1 - exp.1).abs() < 1e-6, "{:?} vs {:?}", point, exp);
        }

        // 2x2 degree block between 41N and 43N
        let area = polygon.area_km2();
        assert!(
            (36000.0..38000.0).contains(&area),
            "unexpected area: {}",
            area
        );
    }

    #[test]
    fn test_extract_is_deterministic() {
        let raster = centered_block_raster();

        let first = extract(&raster, &ExtractOptions::default()).unwrap();
        let second = extract(&raster, &ExtractOptions::default()).unwrap();

        assert_eq!(first.area_km2(), second.area_km2());
        assert_eq!(
            first.geometry().wkt().unwrap(),
            second.geometry().wkt().unwrap()
        );
    }

    #[test]
    fn test_empty_mask_fails_without_output() {
        let grid = MembershipGrid::new(4, 4, vec![0; 16]).unwrap();
        let raster = rasterize(&grid, &degree_profile(4, 4)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");

        let options = ExtractOptions {
            policy: RegionPolicy::First,
            persist: Some(PersistOptions {
                path: Some(path.clone()),
                format: VectorFormat::Geojson,
            }),
        };

        assert!(matches!(
            extract(&raster, &options),
            Err(PolygonizeError::NoGeometryFound)
        ));
        assert!(!path.with_extension("geojson").exists());
    }

    fn two_region_raster() -> Dataset {
        #[rustfmt::skip]
        let grid = MembershipGrid::new(4, 4, vec![
            1, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 1,
            0, 0, 0, 1,
        ])
        .unwrap();

        rasterize(&grid, &degree_profile(4, 4)).unwrap()
    }

    #[test]
    fn test_first_policy_keeps_first_region() {
        let raster = two_region_raster();
        let polygon = extract(&raster, &ExtractOptions::default()).unwrap();

        let ring = polygon.geometry().get_geometry(0);
        let first_point = ring.get_point_vec()[0];
        assert!((first_point.0 - 10.0).abs() < 1e-6);
        assert!((first_point.1 - 44.0).abs() < 1e-6);
    }

    #[test]
    fn test_strict_policy_rejects_multiple_regions() {
        let raster = two_region_raster();
        let options = ExtractOptions {
            policy: RegionPolicy::Strict,
            persist: None,
        };

        assert!(matches!(
            extract(&raster, &options),
            Err(PolygonizeError::MultipleRegionsFound(2))
        ));
    }

    #[test]
    fn test_merge_policy_unions_regions() {
        let raster = two_region_raster();

        let merged = extract(
            &raster,
            &ExtractOptions {
                policy: RegionPolicy::Merge,
                persist: None,
            },
        )
        .unwrap();
        let first_only = extract(&raster, &ExtractOptions::default()).unwrap();

        assert_eq!(merged.geometry().geometry_count(), 2);
        assert!(merged.area_km2() > first_only.area_km2());
    }
}
