use std::fmt;

#[derive(Debug)]
pub enum PolygonizeError {
    /// Grid dimensions disagree with the profile dimensions.
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// A membership cell held something other than 0 or 1.
    MembershipValue { row: usize, col: usize, value: u8 },
    /// The mask contains no 1-valued region to trace.
    NoGeometryFound,
    /// More than one region under the strict region policy.
    MultipleRegionsFound(usize),
    /// Missing or invalid CRS, or a reprojection failure.
    CoordinateSystem(String),
    Gdal(gdal::errors::GdalError),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for PolygonizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolygonizeError::ShapeMismatch { expected, actual } => write!(
                f,
                "Grid dimensions {}x{} do not match the profile dimensions {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            PolygonizeError::MembershipValue { row, col, value } => write!(
                f,
                "Membership value {} at ({}, {}) is not 0 or 1",
                value, row, col
            ),
            PolygonizeError::NoGeometryFound => {
                write!(f, "No valid geometry objects found in the mask")
            }
            PolygonizeError::MultipleRegionsFound(n) => {
                write!(f, "Mask contains {} disjoint regions (strict policy)", n)
            }
            PolygonizeError::CoordinateSystem(msg) => {
                write!(f, "Coordinate system error: {}", msg)
            }
            PolygonizeError::Gdal(e) => write!(f, "GDAL error: {}", e),
            PolygonizeError::Io(e) => write!(f, "I/O error: {}", e),
            PolygonizeError::Json(e) => write!(f, "Failed to serialize JSON: {}", e),
        }
    }
}

impl std::error::Error for PolygonizeError {}

impl From<gdal::errors::GdalError> for PolygonizeError {
    fn from(err: gdal::errors::GdalError) -> PolygonizeError {
        PolygonizeError::Gdal(err)
    }
}

impl From<std::io::Error> for PolygonizeError {
    fn from(err: std::io::Error) -> PolygonizeError {
        PolygonizeError::Io(err)
    }
}

impl From<serde_json::Error> for PolygonizeError {
    fn from(err: serde_json::Error) -> PolygonizeError {
        PolygonizeError::Json(err)
    }
}
