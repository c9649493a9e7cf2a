use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Supported vector output formats. A closed set, so an unsupported format
/// is rejected when the configuration is parsed rather than silently
/// skipping the write.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum VectorFormat {
    #[serde(rename(deserialize = "kml"))]
    Kml,
    #[serde(rename(deserialize = "geojson"))]
    Geojson,
}

impl VectorFormat {
    pub fn extension(self) -> &'static str {
        match self {
            VectorFormat::Kml => "kml",
            VectorFormat::Geojson => "geojson",
        }
    }
}

impl fmt::Display for VectorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[derive(Debug)]
pub struct VectorFormatParseError;

impl fmt::Display for VectorFormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid vector format, expected \"kml\" or \"geojson\"")
    }
}

impl std::error::Error for VectorFormatParseError {}

impl FromStr for VectorFormat {
    type Err = VectorFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kml" => Ok(VectorFormat::Kml),
            "geojson" => Ok(VectorFormat::Geojson),
            _ => Err(VectorFormatParseError),
        }
    }
}
