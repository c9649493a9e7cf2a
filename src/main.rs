mod config;
mod contour;
mod error;
mod membership;
mod profile;
mod projection;
mod rasterize;
mod writer;

use std::env;

use gdal::Dataset;

use config::Config;
use contour::{ExtractOptions, extract};
use membership::MembershipGrid;
use profile::RasterProfile;
use rasterize::rasterize;
use writer::RandomNamer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Starting watershed mask to polygon conversion...");

    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "./data/config/talweg.json".to_string());
    let config = Config::from_file(&config_path)?;

    // The mask raster stands in for the upstream delineation output.
    let source = Dataset::open(config.mask())?;
    let profile = RasterProfile::from_dataset(&source)?;

    let (width, height) = source.raster_size();
    let band = source.rasterband(1)?;
    let buffer = band.read_as::<u8>((0, 0), (width, height), (width, height), None)?;
    let grid = MembershipGrid::new(width, height, buffer.data().to_vec())?;

    if config.verbose() {
        println!("{}", grid);
    }

    let raster = rasterize(&grid, &profile)?;
    let polygon = extract(
        &raster,
        &ExtractOptions {
            policy: config.region_policy(),
            persist: None,
        },
    )?;

    println!("Catchment area: {:.2} km2", polygon.area_km2());

    if config.persist() {
        let format = config.vector_extension();
        let path = writer::resolve_path(config.save_path().as_deref(), format, &RandomNamer);
        writer::write(&polygon, &path, format)?;
        println!("✓ Saved catchment polygon to: {}", path.display());
    }

    Ok(())
}
