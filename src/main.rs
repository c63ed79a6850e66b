use geocover_rs::{CoverageConfig, GeoCoverError, Region};
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> Result<(), GeoCoverError> {
    SubscriberBuilder::default().with_target(false).init();

    let london = (-0.123656, 51.51283);
    let west_molesey = (-0.373535, 51.394043);

    let path = Region::path(&[london, west_molesey])?;
    let cells = path.cells(&CoverageConfig::default().with_precision(5))?;
    println!("Path cells ({}): {:?}", cells.len(), cells);

    let circle = Region::circle(&london, 1000.0)?;
    let cells = circle.cells(&CoverageConfig::default().with_precision(6))?;
    println!("Circle cells ({}): {:?}", cells.len(), cells);

    let polygon = Region::parse(
        "POLYGON((2.32378006 48.8640372, 2.35691071 48.88616602, 2.37905502 48.85816465, 2.32378006 48.8640372))",
    )?;
    let config = CoverageConfig::default().with_precision_range(2, 6);
    println!("Polygon bbox: {:?}", polygon.bbox());
    println!("Polygon fill: {:?}", polygon.cells(&config)?);
    println!(
        "Polygon cover size: {}",
        polygon.cells(&config.with_cover(true))?.len()
    );

    Ok(())
}
