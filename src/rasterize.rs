use gdal::raster::Buffer;
use gdal::{Dataset, DriverManager};

use crate::error::PolygonizeError;
use crate::membership::MembershipGrid;
use crate::profile::RasterProfile;

/// Burns a membership grid into an in-memory single-band raster carrying
/// the profile's spatial metadata.
///
/// The dataset lives entirely in memory (GDAL "MEM" driver) and is released
/// when the returned handle is dropped; nothing is written to disk. A mask
/// band is attached marking every pixel valid, since the only masking
/// geometry in play is the grid's own extent.
pub fn rasterize(
    grid: &MembershipGrid,
    profile: &RasterProfile,
) -> Result<Dataset, PolygonizeError> {
    if grid.shape() != (profile.height, profile.width) {
        return Err(PolygonizeError::ShapeMismatch {
            expected: (profile.height, profile.width),
            actual: grid.shape(),
        });
    }

    let bounds = profile.bounds();
    if bounds.xmin >= bounds.xmax || bounds.ymin >= bounds.ymax {
        return Err(PolygonizeError::CoordinateSystem(format!(
            "Profile transform produces a degenerate extent: {:?}",
            bounds
        )));
    }

    let srs = profile.spatial_ref()?;

    let driver = DriverManager::get_driver_by_name("MEM")?;
    let mut dataset =
        driver.create_with_band_type::<u8, _>("", profile.width, profile.height, 1)?;
    dataset.set_geo_transform(&profile.transform)?;
    dataset.set_spatial_ref(&srs)?;

    let size = (profile.width, profile.height);
    let pixels = profile.width * profile.height;

    {
        let mut band = dataset.rasterband(1)?;
        let mut buffer = Buffer::new(size, grid.buffer().to_vec());
        band.write((0, 0), size, &mut buffer)?;

        band.create_mask_band(false)?;
        let mut mask = band.open_mask_band()?;
        let mut mask_buffer = Buffer::new(size, vec![255u8; pixels]);
        mask.write((0, 0), size, &mut mask_buffer)?;
    }

    Ok(dataset)
}
