use gdal::Dataset;
use gdal::spatial_ref::SpatialRef;

use crate::error::PolygonizeError;

/// Spatial descriptor of a raster grid: dimensions, GDAL-order affine
/// transform and a CRS definition (EPSG code, PROJ string or WKT).
#[derive(Debug, Clone)]
pub struct RasterProfile {
    pub height: usize,
    pub width: usize,
    /// [origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]
    pub transform: [f64; 6],
    pub crs: String,
}

/// Geographic extent of a grid, in the grid's own CRS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl RasterProfile {
    pub fn new(
        height: usize,
        width: usize,
        transform: [f64; 6],
        crs: impl Into<String>,
    ) -> Result<Self, PolygonizeError> {
        if height == 0 || width == 0 {
            return Err(PolygonizeError::ShapeMismatch {
                expected: (1, 1),
                actual: (height, width),
            });
        }

        Ok(RasterProfile {
            height,
            width,
            transform,
            crs: crs.into(),
        })
    }

    /// Reads the profile off an open dataset.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, PolygonizeError> {
        let (width, height) = dataset.raster_size();
        let transform = dataset.geo_transform()?;
        let crs = dataset
            .spatial_ref()
            .map_err(|e| PolygonizeError::CoordinateSystem(format!("Dataset has no CRS: {}", e)))?
            .to_wkt()?;

        RasterProfile::new(height, width, transform, crs)
    }

    /// Maps a pixel-corner coordinate (col, row) to the profile's CRS.
    pub fn pixel_to_coords(&self, col: f64, row: f64) -> (f64, f64) {
        apply_transform(&self.transform, col, row)
    }

    /// Extent of the full grid, from its four corner coordinates.
    pub fn bounds(&self) -> Bounds {
        let corners = [
            self.pixel_to_coords(0.0, 0.0),
            self.pixel_to_coords(self.width as f64, 0.0),
            self.pixel_to_coords(0.0, self.height as f64),
            self.pixel_to_coords(self.width as f64, self.height as f64),
        ];

        let mut bounds = Bounds {
            xmin: f64::INFINITY,
            ymin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymax: f64::NEG_INFINITY,
        };

        for (x, y) in corners {
            bounds.xmin = bounds.xmin.min(x);
            bounds.ymin = bounds.ymin.min(y);
            bounds.xmax = bounds.xmax.max(x);
            bounds.ymax = bounds.ymax.max(y);
        }

        bounds
    }

    /// Resolves the CRS definition through OGR's user-input parsing, so
    /// "EPSG:4326", PROJ strings and WKT are all accepted.
    pub fn spatial_ref(&self) -> Result<SpatialRef, PolygonizeError> {
        SpatialRef::from_definition(&self.crs)
            .map_err(|e| PolygonizeError::CoordinateSystem(format!("Invalid CRS definition: {}", e)))
    }
}

/// Applies a GDAL-order affine transform to a pixel coordinate (col, row).
pub fn apply_transform(transform: &[f64; 6], col: f64, row: f64) -> (f64, f64) {
    let [x0, pw, rx, y0, ry, ph] = *transform;
    (x0 + col * pw + row * rx, y0 + col * ry + row * ph)
}
